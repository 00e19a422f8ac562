use crate::domain::organization::Organization;

/// Data required to render the organization settings template.
pub struct SettingsPageData {
    pub organization: Organization,
    /// All optional modules with their enabled state.
    pub modules: Vec<(String, bool)>,
}
