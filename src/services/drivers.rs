use validator::Validate;

use crate::domain::driver::Driver;
use crate::dto::drivers::{DriverRow, DriversPageData};
use crate::forms::drivers::{AddDriverForm, UpdateDriverForm};
use crate::models::auth::AccessContext;
use crate::repository::{DriverReader, DriverWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads every driver of the organization with their assigned vehicles.
pub fn load_drivers_page<R>(repo: &R, ctx: &AccessContext) -> ServiceResult<DriversPageData>
where
    R: DriverReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let drivers = repo
        .list_drivers_with_vehicles(ctx.user.org_id)?
        .into_iter()
        .map(|(driver, vehicles)| DriverRow { driver, vehicles })
        .collect();

    Ok(DriversPageData { drivers })
}

/// Validates the add-driver form and persists a new driver.
pub fn add_driver<R>(repo: &R, ctx: &AccessContext, form: AddDriverForm) -> ServiceResult<Driver>
where
    R: DriverWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    let new_driver = form.to_new_driver(ctx.user.org_id)?;
    repo.create_driver(&new_driver).map_err(|err| {
        log::error!("Failed to add a driver: {err}");
        ServiceError::from(err)
    })
}

/// Validates the edit form and applies the updates to the driver.
pub fn update_driver<R>(repo: &R, ctx: &AccessContext, form: UpdateDriverForm) -> ServiceResult<()>
where
    R: DriverReader + DriverWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    if repo
        .get_driver_by_id(form.id, ctx.user.org_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let updates = form.to_update_driver()?;
    repo.update_driver(form.id, &updates).map_err(|err| {
        log::error!("Failed to update driver: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}
