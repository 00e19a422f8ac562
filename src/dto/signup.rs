use serde::Serialize;

use crate::domain::signup::{BillingCycle, Plan, Quote, SignupStep, SignupWizard};

/// One selectable plan with its pricing facts, for the plan step.
#[derive(Debug, Serialize)]
pub struct PlanCard {
    pub id: &'static str,
    pub base_cents: i64,
    pub included_vehicles: u32,
    pub per_vehicle_cents: i64,
}

impl From<Plan> for PlanCard {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.as_str(),
            base_cents: plan.base_cents(),
            included_vehicles: plan.included_vehicles(),
            per_vehicle_cents: plan.per_vehicle_cents(),
        }
    }
}

/// Data required to render the signup wizard template.
pub struct SignupPageData {
    pub wizard: SignupWizard,
    pub step: SignupStep,
    pub quote: Option<Quote>,
    pub plans: Vec<PlanCard>,
    pub cycles: Vec<&'static str>,
}

impl SignupPageData {
    pub fn new(wizard: SignupWizard) -> Self {
        let step = wizard.current_step();
        let quote = wizard.quote();
        Self {
            wizard,
            step,
            quote,
            plans: Plan::ALL.iter().copied().map(PlanCard::from).collect(),
            cycles: BillingCycle::ALL.iter().map(|c| c.as_str()).collect(),
        }
    }
}
