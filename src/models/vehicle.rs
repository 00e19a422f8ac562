use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::vehicle::{
    NewVehicle as DomainNewVehicle, UpdateVehicle as DomainUpdateVehicle, Vehicle as DomainVehicle,
    VehicleStatus,
};

/// Diesel model for [`crate::domain::vehicle::Vehicle`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct Vehicle {
    pub id: i32,
    pub org_id: i32,
    pub plate_number: String,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: String,
    pub garage_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Vehicle`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct NewVehicle<'a> {
    pub org_id: i32,
    pub plate_number: &'a str,
    pub vin: &'a str,
    pub make: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub status: String,
    pub garage_id: Option<i32>,
}

/// Data used when updating a [`Vehicle`] record.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct UpdateVehicle<'a> {
    pub plate_number: &'a str,
    pub make: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub status: String,
    pub garage_id: Option<Option<i32>>,
    pub updated_at: NaiveDateTime,
}

impl From<Vehicle> for DomainVehicle {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            org_id: vehicle.org_id,
            plate_number: vehicle.plate_number,
            vin: vehicle.vin,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            status: vehicle.status.parse().unwrap_or(VehicleStatus::Available),
            garage_id: vehicle.garage_id,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewVehicle> for NewVehicle<'a> {
    fn from(vehicle: &'a DomainNewVehicle) -> Self {
        Self {
            org_id: vehicle.org_id,
            plate_number: &vehicle.plate_number,
            vin: &vehicle.vin,
            make: &vehicle.make,
            model: &vehicle.model,
            year: vehicle.year,
            status: vehicle.status.to_string(),
            garage_id: vehicle.garage_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateVehicle> for UpdateVehicle<'a> {
    fn from(updates: &'a DomainUpdateVehicle) -> Self {
        Self {
            plate_number: &updates.plate_number,
            make: &updates.make,
            model: &updates.model,
            year: updates.year,
            status: updates.status.to_string(),
            garage_id: Some(updates.garage_id),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
