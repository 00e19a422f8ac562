//! Signup wizard services: one function per step, plus the final confirm.
//!
//! Each step validates its own form, merges the answers into the wizard state
//! the route keeps in the session, and returns the updated state. Nothing is
//! persisted until [`confirm_signup`].

use validator::Validate;

use crate::domain::organization::NewOrganization;
use crate::domain::signup::SignupWizard;
use crate::domain::types::OrgName;
use crate::forms::signup::{FleetStepForm, OrgStepForm, PlanStepForm};
use crate::repository::OrganizationWriter;
use crate::services::settings::generate_api_key;
use crate::services::{ServiceError, ServiceResult};

/// Applies the plan-selection step.
pub fn apply_plan_step(mut wizard: SignupWizard, form: PlanStepForm) -> ServiceResult<SignupWizard> {
    let plan = form
        .plan
        .parse()
        .map_err(|_| ServiceError::Form("Неизвестный тариф".to_string()))?;
    wizard.plan = Some(plan);
    Ok(wizard)
}

/// Applies the fleet-size and billing-cycle step.
pub fn apply_fleet_step(
    mut wizard: SignupWizard,
    form: FleetStepForm,
) -> ServiceResult<SignupWizard> {
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    let cycle = form
        .cycle
        .parse()
        .map_err(|_| ServiceError::Form("Неизвестный период оплаты".to_string()))?;

    wizard.vehicle_count = Some(form.vehicle_count);
    wizard.cycle = Some(cycle);
    Ok(wizard)
}

/// Applies the organization-details step.
pub fn apply_org_step(mut wizard: SignupWizard, form: OrgStepForm) -> ServiceResult<SignupWizard> {
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    wizard.org_name = Some(form.org_name.trim().to_string());
    wizard.contact_email = Some(form.contact_email.trim().to_lowercase());
    wizard.timezone = form.timezone.filter(|tz| !tz.trim().is_empty());
    wizard.currency = form.currency.filter(|c| !c.trim().is_empty());
    Ok(wizard)
}

/// Creates the organization from a completed wizard. The wizard state itself
/// is discarded by the caller on success.
pub fn confirm_signup<R>(repo: &R, wizard: &SignupWizard) -> ServiceResult<i32>
where
    R: OrganizationWriter + ?Sized,
{
    if !wizard.is_complete() {
        return Err(ServiceError::Form(
            "Регистрация ещё не заполнена до конца".to_string(),
        ));
    }

    let name = wizard
        .org_name
        .as_deref()
        .and_then(|name| OrgName::new(name).ok())
        .ok_or_else(|| ServiceError::Form("Название организации обязательно".to_string()))?;

    let new_org = NewOrganization::new(
        name,
        wizard.timezone.clone().unwrap_or_else(|| "UTC".to_string()),
        "ru".to_string(),
        wizard.currency.clone().unwrap_or_else(|| "RUB".to_string()),
        generate_api_key(),
    );

    let organization = repo.create_organization(&new_org).map_err(|err| {
        log::error!("Failed to create organization: {err}");
        ServiceError::from(err)
    })?;

    Ok(organization.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signup::{BillingCycle, Plan, SignupStep};

    #[test]
    fn steps_accumulate_into_a_complete_wizard() {
        let wizard = SignupWizard::default();

        let wizard = apply_plan_step(
            wizard,
            PlanStepForm {
                plan: "pro".into(),
            },
        )
        .unwrap();
        assert_eq!(wizard.plan, Some(Plan::Pro));

        let wizard = apply_fleet_step(
            wizard,
            FleetStepForm {
                vehicle_count: 30,
                cycle: "annual".into(),
            },
        )
        .unwrap();
        assert_eq!(wizard.cycle, Some(BillingCycle::Annual));
        assert_eq!(wizard.current_step(), SignupStep::Organization);

        let wizard = apply_org_step(
            wizard,
            OrgStepForm {
                org_name: "  Acme Logistics ".into(),
                contact_email: "OPS@Acme.example".into(),
                timezone: Some("Europe/Moscow".into()),
                currency: None,
            },
        )
        .unwrap();
        assert!(wizard.is_complete());
        assert_eq!(wizard.org_name.as_deref(), Some("Acme Logistics"));
        assert_eq!(wizard.contact_email.as_deref(), Some("ops@acme.example"));
    }

    #[test]
    fn unknown_plan_is_rejected() {
        let result = apply_plan_step(
            SignupWizard::default(),
            PlanStepForm {
                plan: "platinum".into(),
            },
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn confirm_requires_a_complete_wizard() {
        let wizard = SignupWizard::default();
        struct NoopRepo;
        impl OrganizationWriter for NoopRepo {
            fn create_organization(
                &self,
                _new_org: &NewOrganization,
            ) -> crate::repository::errors::RepositoryResult<crate::domain::organization::Organization>
            {
                unreachable!("confirm must fail before reaching the repository")
            }
            fn update_org_settings(
                &self,
                _org_id: i32,
                _updates: &crate::domain::organization::UpdateOrgSettings,
            ) -> crate::repository::errors::RepositoryResult<crate::domain::organization::Organization>
            {
                unreachable!()
            }
            fn set_org_api_key(
                &self,
                _org_id: i32,
                _api_key: &str,
            ) -> crate::repository::errors::RepositoryResult<crate::domain::organization::Organization>
            {
                unreachable!()
            }
        }

        assert!(matches!(
            confirm_signup(&NoopRepo, &wizard),
            Err(ServiceError::Form(_))
        ));
    }
}
