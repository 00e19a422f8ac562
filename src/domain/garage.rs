use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::GarageName;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Garage {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub capacity: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewGarage {
    pub org_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub capacity: i32,
}

impl NewGarage {
    #[must_use]
    pub fn new(
        org_id: i32,
        name: GarageName,
        address: Option<String>,
        city: String,
        capacity: i32,
    ) -> Self {
        Self {
            org_id,
            name: name.into_inner(),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            city: city.trim().to_string(),
            capacity: capacity.max(0),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateGarage {
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub capacity: i32,
}

impl UpdateGarage {
    #[must_use]
    pub fn new(name: GarageName, address: Option<String>, city: String, capacity: i32) -> Self {
        Self {
            name: name.into_inner(),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            city: city.trim().to_string(),
            capacity: capacity.max(0),
        }
    }
}
