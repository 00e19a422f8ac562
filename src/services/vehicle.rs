use validator::Validate;

use crate::domain::maintenance::NewMaintenanceRecord;
use crate::dto::vehicle::{VehicleMaintenanceQuery, VehiclePageData};
use crate::forms::vehicle::{AddMaintenanceForm, AssignDriversForm, SaveVehicleForm};
use crate::listing::DEFAULT_ITEMS_PER_PAGE;
use crate::models::auth::AccessContext;
use crate::pagination::Paginated;
use crate::repository::{
    DriverReader, GarageListQuery, GarageReader, MaintenanceListQuery, MaintenanceReader,
    MaintenanceWriter, VehicleReader, VehicleWriter,
};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads one vehicle with its paginated maintenance history, assigned
/// drivers, and the vocabularies the edit forms need.
pub fn load_vehicle_page<R>(
    repo: &R,
    ctx: &AccessContext,
    vehicle_id: i32,
    query: VehicleMaintenanceQuery,
) -> ServiceResult<VehiclePageData>
where
    R: VehicleReader + MaintenanceReader + DriverReader + GarageReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }
    let org_id = ctx.user.org_id;

    let vehicle = repo
        .get_vehicle_by_id(vehicle_id, org_id)?
        .ok_or(ServiceError::NotFound)?;

    let page = query.page.unwrap_or(1);
    let (total, records) = repo.list_maintenance_records(
        MaintenanceListQuery::new(vehicle_id).paginate(page, DEFAULT_ITEMS_PER_PAGE),
    )?;
    let maintenance = Paginated::new(records, page, total, DEFAULT_ITEMS_PER_PAGE);

    let assigned_drivers = repo.list_vehicle_drivers(vehicle_id)?;
    let all_drivers = repo.list_drivers(org_id)?;
    let (_, garages) = repo.list_garages(GarageListQuery::new(org_id))?;

    Ok(VehiclePageData {
        vehicle,
        maintenance,
        assigned_drivers,
        all_drivers,
        garages,
    })
}

/// Validates the edit form and applies the updates to the vehicle.
pub fn save_vehicle<R>(repo: &R, ctx: &AccessContext, form: SaveVehicleForm) -> ServiceResult<()>
where
    R: VehicleReader + VehicleWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    if repo
        .get_vehicle_by_id(form.id, ctx.user.org_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let updates = form.to_update_vehicle()?;
    repo.update_vehicle(form.id, &updates).map_err(|err| {
        log::error!("Failed to update vehicle: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Appends a maintenance record to the vehicle's history.
pub fn add_maintenance_record<R>(
    repo: &R,
    ctx: &AccessContext,
    form: AddMaintenanceForm,
) -> ServiceResult<()>
where
    R: VehicleReader + MaintenanceWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    if repo
        .get_vehicle_by_id(form.vehicle_id, ctx.user.org_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let record: NewMaintenanceRecord = form.try_into()?;
    repo.create_maintenance_record(&record).map_err(|err| {
        log::error!("Failed to add maintenance record: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Replaces the set of drivers assigned to the vehicle.
pub fn assign_drivers<R>(
    repo: &R,
    ctx: &AccessContext,
    form: AssignDriversForm,
) -> ServiceResult<usize>
where
    R: VehicleReader + VehicleWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if repo
        .get_vehicle_by_id(form.vehicle_id, ctx.user.org_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    repo.assign_drivers_to_vehicle(form.vehicle_id, &form.driver_ids)
        .map_err(|err| {
            log::error!("Failed to assign drivers: {err}");
            ServiceError::from(err)
        })
}
