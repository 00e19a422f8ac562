use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::driver::{
    Driver as DomainDriver, DriverStatus, NewDriver as DomainNewDriver,
    UpdateDriver as DomainUpdateDriver, VehicleDriver as DomainVehicleDriver,
};

/// Diesel model for [`crate::domain::driver::Driver`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::drivers)]
pub struct Driver {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Driver`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::drivers)]
pub struct NewDriver<'a> {
    pub org_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub license_number: &'a str,
}

/// Data used when updating a [`Driver`] record.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::drivers)]
pub struct UpdateDriver<'a> {
    pub name: &'a str,
    pub phone: Option<Option<&'a str>>,
    pub license_number: &'a str,
    pub status: String,
}

#[derive(Identifiable, Queryable, Insertable, Associations)]
#[diesel(table_name = crate::schema::vehicle_drivers)]
#[diesel(belongs_to(Driver, foreign_key = driver_id))]
#[diesel(primary_key(vehicle_id, driver_id))]
pub struct VehicleDriver {
    pub vehicle_id: i32,
    pub driver_id: i32,
}

impl From<Driver> for DomainDriver {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            org_id: driver.org_id,
            name: driver.name,
            email: driver.email,
            phone: driver.phone,
            license_number: driver.license_number,
            status: driver.status.parse().unwrap_or(DriverStatus::Active),
            created_at: driver.created_at,
        }
    }
}

impl From<VehicleDriver> for DomainVehicleDriver {
    fn from(pair: VehicleDriver) -> Self {
        Self {
            vehicle_id: pair.vehicle_id,
            driver_id: pair.driver_id,
        }
    }
}

impl<'a> From<&'a DomainNewDriver> for NewDriver<'a> {
    fn from(driver: &'a DomainNewDriver) -> Self {
        Self {
            org_id: driver.org_id,
            name: &driver.name,
            email: &driver.email,
            phone: driver.phone.as_deref(),
            license_number: &driver.license_number,
        }
    }
}

impl<'a> From<&'a DomainUpdateDriver> for UpdateDriver<'a> {
    fn from(updates: &'a DomainUpdateDriver) -> Self {
        Self {
            name: &updates.name,
            phone: Some(updates.phone.as_deref()),
            license_number: &updates.license_number,
            status: updates.status.to_string(),
        }
    }
}
