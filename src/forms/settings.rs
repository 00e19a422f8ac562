use serde::Deserialize;
use validator::Validate;

use crate::domain::organization::UpdateOrgSettings;
use crate::domain::types::{OrgName, TypeConstraintError};

/// Settings form; the module checkboxes arrive as repeated `modules` keys and
/// are parsed with `serde_html_form`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SettingsForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub timezone: String,
    #[validate(length(min = 2, max = 8))]
    pub locale: String,
    #[validate(length(equal = 3))]
    pub currency: String,
    pub modules: Vec<String>,
}

impl SettingsForm {
    pub fn to_update_settings(&self) -> Result<UpdateOrgSettings, TypeConstraintError> {
        Ok(UpdateOrgSettings::new(
            OrgName::new(&self.name)?,
            self.timezone.clone(),
            self.locale.clone(),
            self.currency.clone(),
            self.modules.clone(),
        ))
    }
}
