use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::text_enum;
use crate::domain::types::{PlateNumber, Vin};

text_enum!(
    /// Operational state of a vehicle. `InService` means the vehicle is in a
    /// garage for maintenance, not available for orders.
    VehicleStatus {
        Available => "available",
        InService => "in_service",
        Retired => "retired",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: i32,
    pub org_id: i32,
    pub plate_number: String,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    pub garage_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewVehicle {
    pub org_id: i32,
    pub plate_number: String,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    pub garage_id: Option<i32>,
}

impl NewVehicle {
    #[must_use]
    pub fn new(
        org_id: i32,
        plate_number: PlateNumber,
        vin: Vin,
        make: String,
        model: String,
        year: i32,
        garage_id: Option<i32>,
    ) -> Self {
        Self {
            org_id,
            plate_number: plate_number.into_inner(),
            vin: vin.into_inner(),
            make: make.trim().to_string(),
            model: model.trim().to_string(),
            year,
            status: VehicleStatus::Available,
            garage_id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateVehicle {
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    pub garage_id: Option<i32>,
}

impl UpdateVehicle {
    #[must_use]
    pub fn new(
        plate_number: PlateNumber,
        make: String,
        model: String,
        year: i32,
        status: VehicleStatus,
        garage_id: Option<i32>,
    ) -> Self {
        Self {
            plate_number: plate_number.into_inner(),
            make: make.trim().to_string(),
            model: model.trim().to_string(),
            year,
            status,
            garage_id,
        }
    }
}
