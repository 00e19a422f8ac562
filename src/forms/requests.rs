use serde::Deserialize;
use validator::Validate;

use crate::domain::order::NewOrder;
use crate::services::ServiceError;

#[derive(Debug, Deserialize, Validate)]
pub struct AddOrderForm {
    pub kind: String,
    pub vehicle_id: i32,
    /// Select value; the empty option means "not assigned yet".
    #[serde(default)]
    pub driver_id: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl AddOrderForm {
    pub fn to_new_order(&self, org_id: i32) -> Result<NewOrder, ServiceError> {
        let kind = self
            .kind
            .parse()
            .map_err(|_| ServiceError::Form("Недопустимый тип заявки".to_string()))?;

        Ok(NewOrder::new(
            org_id,
            kind,
            self.vehicle_id,
            self.driver_id.trim().parse().ok(),
            self.notes.clone(),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct SetOrderStatusForm {
    pub id: i32,
    pub status: String,
}
