use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::garage::{
    Garage as DomainGarage, NewGarage as DomainNewGarage, UpdateGarage as DomainUpdateGarage,
};

/// Diesel model for [`crate::domain::garage::Garage`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::garages)]
pub struct Garage {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub capacity: i32,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Garage`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::garages)]
pub struct NewGarage<'a> {
    pub org_id: i32,
    pub name: &'a str,
    pub address: Option<&'a str>,
    pub city: &'a str,
    pub capacity: i32,
}

/// Data used when updating a [`Garage`] record.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::garages)]
pub struct UpdateGarage<'a> {
    pub name: &'a str,
    pub address: Option<Option<&'a str>>,
    pub city: &'a str,
    pub capacity: i32,
}

impl From<Garage> for DomainGarage {
    fn from(garage: Garage) -> Self {
        Self {
            id: garage.id,
            org_id: garage.org_id,
            name: garage.name,
            address: garage.address,
            city: garage.city,
            capacity: garage.capacity,
            created_at: garage.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewGarage> for NewGarage<'a> {
    fn from(garage: &'a DomainNewGarage) -> Self {
        Self {
            org_id: garage.org_id,
            name: &garage.name,
            address: garage.address.as_deref(),
            city: &garage.city,
            capacity: garage.capacity,
        }
    }
}

impl<'a> From<&'a DomainUpdateGarage> for UpdateGarage<'a> {
    fn from(updates: &'a DomainUpdateGarage) -> Self {
        Self {
            name: &updates.name,
            address: Some(updates.address.as_deref()),
            city: &updates.city,
            capacity: updates.capacity,
        }
    }
}
