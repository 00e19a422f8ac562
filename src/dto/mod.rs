pub mod billing;
pub mod drivers;
pub mod fleet;
pub mod garages;
pub mod requests;
pub mod screening;
pub mod settings;
pub mod signup;
pub mod vehicle;

/// The list interaction a request carries besides the restored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// A filter checkbox was clicked: flip one option of one category.
    Toggle { category: String, option_id: String },
    /// The search input lost focus with a (possibly empty) new value.
    CommitSearch(String),
    /// The "reset filters" control was used.
    ClearFilters,
    /// Plain navigation or reload; fetch the restored state as-is.
    None,
}

impl ListAction {
    /// Builds the action from the shared `toggle` / `clear` / `pending_q`
    /// request parameters. `toggle` is encoded as `category:option_id`.
    pub fn from_params(toggle: Option<&str>, clear: bool, pending_q: Option<String>) -> Self {
        if clear {
            return ListAction::ClearFilters;
        }
        if let Some(toggle) = toggle {
            if let Some((category, option_id)) = toggle.split_once(':') {
                return ListAction::Toggle {
                    category: category.to_string(),
                    option_id: option_id.to_string(),
                };
            }
        }
        if let Some(pending) = pending_q {
            return ListAction::CommitSearch(pending);
        }
        ListAction::None
    }
}

/// Numeric range bound arriving as form text; empty submissions mean "unset".
pub fn parse_bound(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_wins_over_other_actions() {
        let action = ListAction::from_params(Some("status:available"), true, Some("x".into()));
        assert_eq!(action, ListAction::ClearFilters);
    }

    #[test]
    fn toggle_is_split_on_the_first_colon() {
        let action = ListAction::from_params(Some("status:in_service"), false, None);
        assert_eq!(
            action,
            ListAction::Toggle {
                category: "status".into(),
                option_id: "in_service".into()
            }
        );
    }

    #[test]
    fn malformed_toggle_falls_through() {
        assert_eq!(ListAction::from_params(Some("status"), false, None), ListAction::None);
    }

    #[test]
    fn empty_pending_search_still_commits() {
        assert_eq!(
            ListAction::from_params(None, false, Some(String::new())),
            ListAction::CommitSearch(String::new())
        );
    }

    #[test]
    fn bounds_parse_leniently() {
        assert_eq!(parse_bound(Some(" 2015 ")), Some(2015));
        assert_eq!(parse_bound(Some("")), None);
        assert_eq!(parse_bound(Some("abc")), None);
        assert_eq!(parse_bound(None), None);
    }
}
