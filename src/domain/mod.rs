pub mod driver;
pub mod garage;
pub mod maintenance;
pub mod order;
pub mod organization;
pub mod screening;
pub mod signup;
pub mod types;
pub mod vehicle;

/// Generates a closed status/kind enum with a stable textual id per variant.
/// The id is what gets stored in the database, used as a filter option id,
/// and rendered in query strings.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::domain::types::TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(crate::domain::types::TypeConstraintError::InvalidValue(
                        other.to_string(),
                    )),
                }
            }
        }
    };
}

pub(crate) use text_enum;
