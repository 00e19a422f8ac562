use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::organization::{
    NewOrganization as DomainNewOrganization, Organization as DomainOrganization,
};

/// Diesel model for [`crate::domain::organization::Organization`]. The
/// enabled module list is stored as a comma-joined TEXT column.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::organizations)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub timezone: String,
    pub locale: String,
    pub currency: String,
    pub api_key: String,
    pub modules: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Organization`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::organizations)]
pub struct NewOrganization<'a> {
    pub name: &'a str,
    pub timezone: &'a str,
    pub locale: &'a str,
    pub currency: &'a str,
    pub api_key: &'a str,
    pub modules: String,
}

pub fn join_modules(modules: &[String]) -> String {
    modules.join(",")
}

pub fn split_modules(modules: &str) -> Vec<String> {
    modules
        .split(',')
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<Organization> for DomainOrganization {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            timezone: org.timezone,
            locale: org.locale,
            currency: org.currency,
            api_key: org.api_key,
            modules: split_modules(&org.modules),
            created_at: org.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewOrganization> for NewOrganization<'a> {
    fn from(org: &'a DomainNewOrganization) -> Self {
        Self {
            name: &org.name,
            timezone: &org.timezone,
            locale: &org.locale,
            currency: &org.currency,
            api_key: &org.api_key,
            modules: join_modules(&org.modules),
        }
    }
}
