use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::text_enum;
use crate::domain::types::NonEmptyString;

text_enum!(
    MaintenanceKind {
        Inspection => "inspection",
        Repair => "repair",
        TireService => "tire_service",
    }
);

/// One entry of a vehicle's maintenance history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub garage_id: Option<i32>,
    pub kind: MaintenanceKind,
    pub description: String,
    /// Minor currency units.
    pub cost_cents: i64,
    pub performed_at: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMaintenanceRecord {
    pub vehicle_id: i32,
    pub garage_id: Option<i32>,
    pub kind: MaintenanceKind,
    pub description: String,
    pub cost_cents: i64,
    pub performed_at: NaiveDate,
}

impl NewMaintenanceRecord {
    #[must_use]
    pub fn new(
        vehicle_id: i32,
        garage_id: Option<i32>,
        kind: MaintenanceKind,
        description: NonEmptyString,
        cost_cents: i64,
        performed_at: NaiveDate,
    ) -> Self {
        Self {
            vehicle_id,
            garage_id,
            kind,
            description: description.into_inner(),
            cost_cents: cost_cents.max(0),
            performed_at,
        }
    }
}
