use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::maintenance::NewMaintenanceRecord;
use crate::domain::types::{NonEmptyString, PlateNumber};
use crate::domain::vehicle::UpdateVehicle;
use crate::services::ServiceError;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveVehicleForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub plate_number: String,
    #[validate(length(min = 1))]
    pub make: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,
    pub status: String,
    /// Select value; the empty option means "no garage".
    #[serde(default)]
    pub garage_id: String,
}

impl SaveVehicleForm {
    pub fn to_update_vehicle(&self) -> Result<UpdateVehicle, ServiceError> {
        let status = self
            .status
            .parse()
            .map_err(|_| ServiceError::Form("Недопустимый статус ТС".to_string()))?;

        Ok(UpdateVehicle::new(
            PlateNumber::new(&self.plate_number)?,
            self.make.clone(),
            self.model.clone(),
            self.year,
            status,
            self.garage_id.trim().parse().ok(),
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddMaintenanceForm {
    pub vehicle_id: i32,
    /// Select value; the empty option means "outside workshop".
    #[serde(default)]
    pub garage_id: String,
    pub kind: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0))]
    pub cost_cents: i64,
    pub performed_at: NaiveDate,
}

impl TryFrom<AddMaintenanceForm> for NewMaintenanceRecord {
    type Error = ServiceError;

    fn try_from(form: AddMaintenanceForm) -> Result<Self, Self::Error> {
        let kind = form
            .kind
            .parse()
            .map_err(|_| ServiceError::Form("Недопустимый вид работ".to_string()))?;
        let description = NonEmptyString::new(&form.description)?;

        Ok(NewMaintenanceRecord::new(
            form.vehicle_id,
            form.garage_id.trim().parse().ok(),
            kind,
            description,
            form.cost_cents,
            form.performed_at,
        ))
    }
}

/// Replacement set of drivers for one vehicle; arrives as repeated
/// `driver_ids` keys and is parsed with `serde_html_form`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssignDriversForm {
    pub vehicle_id: i32,
    pub driver_ids: Vec<i32>,
}
