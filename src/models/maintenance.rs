use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::maintenance::{
    MaintenanceKind, MaintenanceRecord as DomainMaintenanceRecord,
    NewMaintenanceRecord as DomainNewMaintenanceRecord,
};

/// Diesel model for [`crate::domain::maintenance::MaintenanceRecord`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::maintenance_records)]
pub struct MaintenanceRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub garage_id: Option<i32>,
    pub kind: String,
    pub description: String,
    pub cost_cents: i64,
    pub performed_at: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`MaintenanceRecord`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::maintenance_records)]
pub struct NewMaintenanceRecord<'a> {
    pub vehicle_id: i32,
    pub garage_id: Option<i32>,
    pub kind: String,
    pub description: &'a str,
    pub cost_cents: i64,
    pub performed_at: NaiveDate,
}

impl From<MaintenanceRecord> for DomainMaintenanceRecord {
    fn from(record: MaintenanceRecord) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            garage_id: record.garage_id,
            kind: record.kind.parse().unwrap_or(MaintenanceKind::Inspection),
            description: record.description,
            cost_cents: record.cost_cents,
            performed_at: record.performed_at,
            created_at: record.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewMaintenanceRecord> for NewMaintenanceRecord<'a> {
    fn from(record: &'a DomainNewMaintenanceRecord) -> Self {
        Self {
            vehicle_id: record.vehicle_id,
            garage_id: record.garage_id,
            kind: record.kind.to_string(),
            description: &record.description,
            cost_cents: record.cost_cents,
            performed_at: record.performed_at,
        }
    }
}
