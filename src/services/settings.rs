use rand::RngExt;
use rand::distr::Alphanumeric;
use validator::Validate;

use crate::domain::organization::{OPTIONAL_MODULES, Organization};
use crate::dto::settings::SettingsPageData;
use crate::forms::settings::SettingsForm;
use crate::models::auth::{AccessContext, AuthenticatedUser};
use crate::repository::{OrganizationReader, OrganizationWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Length of generated organization API keys.
const API_KEY_LEN: usize = 40;

pub fn generate_api_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LEN)
        .map(char::from)
        .collect()
}

/// Builds the per-request access context: the authenticated user plus the
/// organization's enabled modules.
pub fn load_access_context<R>(repo: &R, user: AuthenticatedUser) -> ServiceResult<AccessContext>
where
    R: OrganizationReader + ?Sized,
{
    let modules = repo
        .get_organization(user.org_id)?
        .map(|org| org.modules)
        .unwrap_or_default();

    Ok(AccessContext::new(user, modules))
}

/// Loads the organization settings page.
pub fn load_settings_page<R>(repo: &R, ctx: &AccessContext) -> ServiceResult<SettingsPageData>
where
    R: OrganizationReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let organization = repo
        .get_organization(ctx.user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    let modules = OPTIONAL_MODULES
        .iter()
        .map(|module| (module.to_string(), organization.module_enabled(module)))
        .collect();

    Ok(SettingsPageData {
        organization,
        modules,
    })
}

/// Validates and persists the organization settings form.
pub fn save_settings<R>(
    repo: &R,
    ctx: &AccessContext,
    form: SettingsForm,
) -> ServiceResult<Organization>
where
    R: OrganizationWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    let updates = form.to_update_settings()?;
    repo.update_org_settings(ctx.user.org_id, &updates)
        .map_err(|err| {
            log::error!("Failed to save settings: {err}");
            ServiceError::from(err)
        })
}

/// Replaces the organization's API key with a freshly generated one.
pub fn rotate_api_key<R>(repo: &R, ctx: &AccessContext) -> ServiceResult<Organization>
where
    R: OrganizationWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    repo.set_org_api_key(ctx.user.org_id, &generate_api_key())
        .map_err(|err| {
            log::error!("Failed to rotate API key: {err}");
            ServiceError::from(err)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_keys_are_long_and_unique() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_eq!(a.len(), API_KEY_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
