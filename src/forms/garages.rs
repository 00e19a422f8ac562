use serde::Deserialize;
use validator::Validate;

use crate::domain::garage::{NewGarage, UpdateGarage};
use crate::domain::types::{GarageName, TypeConstraintError};

#[derive(Debug, Deserialize, Validate)]
pub struct AddGarageForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
}

impl AddGarageForm {
    pub fn to_new_garage(&self, org_id: i32) -> Result<NewGarage, TypeConstraintError> {
        Ok(NewGarage::new(
            org_id,
            GarageName::new(&self.name)?,
            self.address.clone(),
            self.city.clone(),
            self.capacity,
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGarageForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(range(min = 0))]
    pub capacity: i32,
}

impl UpdateGarageForm {
    pub fn to_update_garage(&self) -> Result<UpdateGarage, TypeConstraintError> {
        Ok(UpdateGarage::new(
            GarageName::new(&self.name)?,
            self.address.clone(),
            self.city.clone(),
            self.capacity,
        ))
    }
}
