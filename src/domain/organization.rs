use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::OrgName;

/// Optional modules an organization can switch on.
pub const MODULE_BILLING: &str = "billing";
pub const MODULE_SCREENING: &str = "screening";

pub const OPTIONAL_MODULES: &[&str] = &[MODULE_BILLING, MODULE_SCREENING];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub timezone: String,
    pub locale: String,
    pub currency: String,
    pub api_key: String,
    /// Enabled optional modules; pages for disabled modules are not served.
    pub modules: Vec<String>,
    pub created_at: NaiveDateTime,
}

impl Organization {
    pub fn module_enabled(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub timezone: String,
    pub locale: String,
    pub currency: String,
    pub api_key: String,
    pub modules: Vec<String>,
}

impl NewOrganization {
    #[must_use]
    pub fn new(name: OrgName, timezone: String, locale: String, currency: String, api_key: String) -> Self {
        Self {
            name: name.into_inner(),
            timezone,
            locale,
            currency: currency.to_uppercase(),
            api_key,
            modules: OPTIONAL_MODULES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateOrgSettings {
    pub name: String,
    pub timezone: String,
    pub locale: String,
    pub currency: String,
    pub modules: Vec<String>,
}

impl UpdateOrgSettings {
    /// Unknown module names are dropped so the stored list only ever
    /// contains entries from [`OPTIONAL_MODULES`].
    #[must_use]
    pub fn new(
        name: OrgName,
        timezone: String,
        locale: String,
        currency: String,
        modules: Vec<String>,
    ) -> Self {
        Self {
            name: name.into_inner(),
            timezone,
            locale,
            currency: currency.to_uppercase(),
            modules: modules
                .into_iter()
                .filter(|m| OPTIONAL_MODULES.contains(&m.as_str()))
                .collect(),
        }
    }
}
