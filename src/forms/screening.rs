use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::screening::NewScreeningLog;
use crate::services::ServiceError;

#[derive(Debug, Deserialize, Validate)]
pub struct AddScreeningForm {
    pub driver_id: i32,
    pub kind: String,
    pub result: String,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
    pub screened_at: NaiveDate,
}

impl AddScreeningForm {
    pub fn to_new_log(&self, org_id: i32) -> Result<NewScreeningLog, ServiceError> {
        let kind = self
            .kind
            .parse()
            .map_err(|_| ServiceError::Form("Недопустимый вид проверки".to_string()))?;
        let result = self
            .result
            .parse()
            .map_err(|_| ServiceError::Form("Недопустимый результат проверки".to_string()))?;

        let screened_at = self
            .screened_at
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ServiceError::Form("Недопустимая дата проверки".to_string()))?;

        Ok(NewScreeningLog::new(
            org_id,
            self.driver_id,
            kind,
            result,
            self.note.clone(),
            screened_at,
        ))
    }
}
