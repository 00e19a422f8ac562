//! Signup wizard state and pricing derivation.
//!
//! The wizard lives in the visitor's cookie session until the final step is
//! confirmed; only then is the organization created. Pricing is a pure
//! derivation from the selected plan, fleet size, and billing cycle.

use serde::{Deserialize, Serialize};

use crate::domain::text_enum;

text_enum!(
    Plan {
        Starter => "starter",
        Pro => "pro",
        Enterprise => "enterprise",
    }
);

impl Plan {
    /// Base price per month in minor units, covering the included vehicles.
    pub const fn base_cents(self) -> i64 {
        match self {
            Plan::Starter => 4_900,
            Plan::Pro => 19_900,
            Plan::Enterprise => 49_900,
        }
    }

    /// Vehicles covered by the base price.
    pub const fn included_vehicles(self) -> u32 {
        match self {
            Plan::Starter => 5,
            Plan::Pro => 25,
            Plan::Enterprise => 100,
        }
    }

    /// Monthly price per vehicle beyond the included allowance.
    pub const fn per_vehicle_cents(self) -> i64 {
        match self {
            Plan::Starter => 500,
            Plan::Pro => 400,
            Plan::Enterprise => 300,
        }
    }
}

text_enum!(
    BillingCycle {
        Monthly => "monthly",
        Annual => "annual",
    }
);

/// Annual billing takes two months off the yearly total.
const ANNUAL_FREE_MONTHS: i64 = 2;

/// Derived price for one billing period. Every component is kept so the
/// review step can itemize the total.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub plan: Plan,
    pub vehicle_count: u32,
    pub cycle: BillingCycle,
    pub base_cents: i64,
    pub extra_vehicles: u32,
    pub extra_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

/// Computes the price for one billing period of the given configuration.
pub fn derive_quote(plan: Plan, vehicle_count: u32, cycle: BillingCycle) -> Quote {
    let extra_vehicles = vehicle_count.saturating_sub(plan.included_vehicles());
    let monthly_base = plan.base_cents();
    let monthly_extra = i64::from(extra_vehicles) * plan.per_vehicle_cents();
    let monthly_total = monthly_base + monthly_extra;

    let (base_cents, extra_cents, discount_cents) = match cycle {
        BillingCycle::Monthly => (monthly_base, monthly_extra, 0),
        BillingCycle::Annual => (
            monthly_base * 12,
            monthly_extra * 12,
            monthly_total * ANNUAL_FREE_MONTHS,
        ),
    };

    Quote {
        plan,
        vehicle_count,
        cycle,
        base_cents,
        extra_vehicles,
        extra_cents,
        discount_cents,
        total_cents: base_cents + extra_cents - discount_cents,
    }
}

/// Steps of the signup wizard, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStep {
    Plan,
    Fleet,
    Organization,
    Review,
}

/// Wizard progress, serialized into the session between steps. Earlier steps
/// may be re-submitted at any time; later answers are kept unless they become
/// inconsistent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SignupWizard {
    pub plan: Option<Plan>,
    pub vehicle_count: Option<u32>,
    pub cycle: Option<BillingCycle>,
    pub org_name: Option<String>,
    pub contact_email: Option<String>,
    pub timezone: Option<String>,
    pub currency: Option<String>,
}

impl SignupWizard {
    /// First step still missing an answer; `Review` once everything is set.
    pub fn current_step(&self) -> SignupStep {
        if self.plan.is_none() {
            SignupStep::Plan
        } else if self.vehicle_count.is_none() || self.cycle.is_none() {
            SignupStep::Fleet
        } else if self.org_name.is_none() || self.contact_email.is_none() {
            SignupStep::Organization
        } else {
            SignupStep::Review
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_step() == SignupStep::Review
    }

    /// Quote for the review step; `None` until plan and fleet are chosen.
    pub fn quote(&self) -> Option<Quote> {
        Some(derive_quote(self.plan?, self.vehicle_count?, self.cycle?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_within_included_allowance_is_base_price() {
        let quote = derive_quote(Plan::Starter, 3, BillingCycle::Monthly);
        assert_eq!(quote.extra_vehicles, 0);
        assert_eq!(quote.extra_cents, 0);
        assert_eq!(quote.total_cents, 4_900);
    }

    #[test]
    fn extra_vehicles_are_charged_at_the_plan_rate() {
        let quote = derive_quote(Plan::Pro, 30, BillingCycle::Monthly);
        assert_eq!(quote.extra_vehicles, 5);
        assert_eq!(quote.extra_cents, 5 * 400);
        assert_eq!(quote.total_cents, 19_900 + 2_000);
    }

    #[test]
    fn annual_cycle_takes_two_months_off() {
        let monthly = derive_quote(Plan::Pro, 30, BillingCycle::Monthly);
        let annual = derive_quote(Plan::Pro, 30, BillingCycle::Annual);
        assert_eq!(annual.discount_cents, monthly.total_cents * 2);
        assert_eq!(annual.total_cents, monthly.total_cents * 10);
    }

    #[test]
    fn wizard_walks_steps_in_order() {
        let mut wizard = SignupWizard::default();
        assert_eq!(wizard.current_step(), SignupStep::Plan);
        assert_eq!(wizard.quote(), None);

        wizard.plan = Some(Plan::Starter);
        assert_eq!(wizard.current_step(), SignupStep::Fleet);

        wizard.vehicle_count = Some(8);
        wizard.cycle = Some(BillingCycle::Monthly);
        assert_eq!(wizard.current_step(), SignupStep::Organization);

        wizard.org_name = Some("Acme Logistics".into());
        wizard.contact_email = Some("ops@acme.example".into());
        assert_eq!(wizard.current_step(), SignupStep::Review);
        assert!(wizard.is_complete());

        let quote = wizard.quote().unwrap();
        assert_eq!(quote.extra_vehicles, 3);
        assert_eq!(quote.total_cents, 4_900 + 3 * 500);
    }

    #[test]
    fn revisiting_an_earlier_step_keeps_later_answers() {
        let mut wizard = SignupWizard {
            plan: Some(Plan::Starter),
            vehicle_count: Some(8),
            cycle: Some(BillingCycle::Annual),
            org_name: Some("Acme".into()),
            contact_email: Some("ops@acme.example".into()),
            ..SignupWizard::default()
        };

        wizard.plan = Some(Plan::Pro);
        assert!(wizard.is_complete());
        assert_eq!(wizard.quote().unwrap().plan, Plan::Pro);
    }
}
