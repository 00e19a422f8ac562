use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct PlanStepForm {
    pub plan: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FleetStepForm {
    #[validate(range(min = 1, max = 10_000))]
    pub vehicle_count: u32,
    pub cycle: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrgStepForm {
    #[validate(length(min = 1))]
    pub org_name: String,
    #[validate(email)]
    pub contact_email: String,
    pub timezone: Option<String>,
    pub currency: Option<String>,
}
