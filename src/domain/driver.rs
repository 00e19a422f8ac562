use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::text_enum;
use crate::domain::types::{DriverEmail, DriverName, normalize_phone_to_e164};

text_enum!(
    DriverStatus {
        Active => "active",
        Suspended => "suspended",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub status: DriverStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewDriver {
    pub org_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub license_number: String,
}

impl NewDriver {
    /// Phone numbers that fail E.164 normalization are dropped rather than
    /// rejected; the email and name have already been validated upstream.
    #[must_use]
    pub fn new(
        org_id: i32,
        name: DriverName,
        email: DriverEmail,
        phone: Option<String>,
        license_number: String,
    ) -> Self {
        Self {
            org_id,
            name: name.into_inner(),
            email: email.into_inner(),
            phone: phone.and_then(|s| normalize_phone_to_e164(&s).ok()),
            license_number: license_number.trim().to_uppercase(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateDriver {
    pub name: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub status: DriverStatus,
}

impl UpdateDriver {
    #[must_use]
    pub fn new(
        name: DriverName,
        phone: Option<String>,
        license_number: String,
        status: DriverStatus,
    ) -> Self {
        Self {
            name: name.into_inner(),
            phone: phone.and_then(|s| normalize_phone_to_e164(&s).ok()),
            license_number: license_number.trim().to_uppercase(),
            status,
        }
    }
}

/// Assignment of a driver to a vehicle.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VehicleDriver {
    pub vehicle_id: i32,
    pub driver_id: i32,
}
