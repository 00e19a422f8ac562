use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::screening::{
    NewScreeningLog as DomainNewScreeningLog, ScreeningKind, ScreeningLog as DomainScreeningLog,
    ScreeningResult,
};

/// Diesel model for [`crate::domain::screening::ScreeningLog`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::screening_logs)]
pub struct ScreeningLog {
    pub id: i32,
    pub org_id: i32,
    pub driver_id: i32,
    pub kind: String,
    pub result: String,
    pub note: Option<String>,
    pub screened_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`ScreeningLog`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::screening_logs)]
pub struct NewScreeningLog<'a> {
    pub org_id: i32,
    pub driver_id: i32,
    pub kind: String,
    pub result: String,
    pub note: Option<&'a str>,
    pub screened_at: NaiveDateTime,
}

impl From<ScreeningLog> for DomainScreeningLog {
    fn from(log: ScreeningLog) -> Self {
        Self {
            id: log.id,
            org_id: log.org_id,
            driver_id: log.driver_id,
            kind: log.kind.parse().unwrap_or(ScreeningKind::License),
            result: log.result.parse().unwrap_or(ScreeningResult::Pending),
            note: log.note,
            screened_at: log.screened_at,
            created_at: log.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewScreeningLog> for NewScreeningLog<'a> {
    fn from(log: &'a DomainNewScreeningLog) -> Self {
        Self {
            org_id: log.org_id,
            driver_id: log.driver_id,
            kind: log.kind.to_string(),
            result: log.result.to_string(),
            note: log.note.as_deref(),
            screened_at: log.screened_at,
        }
    }
}
