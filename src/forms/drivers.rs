use serde::Deserialize;
use validator::Validate;

use crate::domain::driver::{NewDriver, UpdateDriver};
use crate::domain::types::{DriverEmail, DriverName, TypeConstraintError};
use crate::services::ServiceError;

#[derive(Debug, Deserialize, Validate)]
pub struct AddDriverForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1))]
    pub license_number: String,
}

impl AddDriverForm {
    pub fn to_new_driver(&self, org_id: i32) -> Result<NewDriver, TypeConstraintError> {
        Ok(NewDriver::new(
            org_id,
            DriverName::new(&self.name)?,
            DriverEmail::new(&self.email)?,
            self.phone.clone(),
            self.license_number.clone(),
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(length(min = 1))]
    pub license_number: String,
    pub status: String,
}

impl UpdateDriverForm {
    pub fn to_update_driver(&self) -> Result<UpdateDriver, ServiceError> {
        let status = self
            .status
            .parse()
            .map_err(|_| ServiceError::Form("Недопустимый статус водителя".to_string()))?;

        Ok(UpdateDriver::new(
            DriverName::new(&self.name)?,
            self.phone.clone(),
            self.license_number.clone(),
            status,
        ))
    }
}
