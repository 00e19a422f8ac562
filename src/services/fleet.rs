use std::collections::BTreeMap;

use validator::Validate;

use crate::domain::vehicle::{NewVehicle, Vehicle, VehicleStatus};
use crate::dto::ListAction;
use crate::dto::fleet::{FleetListParams, FleetPageData};
use crate::forms::fleet::{AddVehicleForm, UploadVehiclesForm};
use crate::listing::{
    DEFAULT_ITEMS_PER_PAGE, FilterOption, FilterOptions, ListController, ListingResult, Page,
    PageFetcher, PageMeta, QueryParams,
};
use crate::models::auth::AccessContext;
use crate::repository::{GarageListQuery, GarageReader, VehicleListQuery, VehicleReader, VehicleWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub const FILTER_STATUS: &str = "status";
pub const FILTER_GARAGE: &str = "garage";

/// Adapts the vehicle repository to the list-page fetch contract.
pub struct VehiclePages<'a, R: ?Sized> {
    repo: &'a R,
    org_id: i32,
}

impl<'a, R: ?Sized> VehiclePages<'a, R> {
    pub fn new(repo: &'a R, org_id: i32) -> Self {
        Self { repo, org_id }
    }
}

impl<R> PageFetcher for VehiclePages<'_, R>
where
    R: VehicleReader + ?Sized,
{
    type Item = Vehicle;

    fn fetch_page(&self, query: &QueryParams) -> ListingResult<Page<Vehicle>> {
        let mut list_query = VehicleListQuery::new(self.org_id)
            .year_range(query.year_min, query.year_max);

        if let Some(search) = &query.search {
            list_query = list_query.search(search.clone());
        }
        if let Some(ids) = query.filter_ids(FILTER_STATUS) {
            list_query = list_query.statuses(ids.iter().filter_map(|id| id.parse().ok()).collect());
        }
        if let Some(ids) = query.filter_ids(FILTER_GARAGE) {
            list_query = list_query.garages(ids.iter().filter_map(|id| id.parse().ok()).collect());
        }

        let (total, mut items) = self
            .repo
            .list_vehicles(list_query.clone().paginate(query.page, query.size))?;

        let meta = PageMeta::for_page(query.page, query.size, total);
        if meta.current_page != query.page {
            items = self
                .repo
                .list_vehicles(list_query.paginate(meta.current_page, query.size))?
                .1;
        }

        Ok(Page { items, meta })
    }
}

fn status_name(status: VehicleStatus) -> &'static str {
    match status {
        VehicleStatus::Available => "Свободен",
        VehicleStatus::InService => "В ремонте",
        VehicleStatus::Retired => "Списан",
    }
}

/// Loads the fleet list for the index page, applying the interaction the
/// request carries (filter toggle, search commit, reset) before fetching.
pub fn load_fleet_page<R>(
    repo: &R,
    ctx: &AccessContext,
    params: FleetListParams,
) -> ServiceResult<FleetPageData>
where
    R: VehicleReader + GarageReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }
    let org_id = ctx.user.org_id;

    let mut controller =
        ListController::new(VehiclePages::new(repo, org_id), DEFAULT_ITEMS_PER_PAGE);
    controller.restore(params.snapshot());

    match params.action() {
        ListAction::Toggle {
            category,
            option_id,
        } => controller.toggle_filter_option(&category, &option_id)?,
        ListAction::CommitSearch(pending) => {
            controller.set_search_draft(pending);
            controller.commit_search()?;
        }
        ListAction::ClearFilters => controller.clear_all_filters()?,
        ListAction::None => controller.refresh()?,
    }

    let (_, garages) = repo.list_garages(GarageListQuery::new(org_id))?;

    let mut filter_options = FilterOptions::new();
    filter_options.insert(
        FILTER_STATUS.to_string(),
        VehicleStatus::ALL
            .iter()
            .map(|status| FilterOption::new(status.as_str(), status_name(*status)))
            .collect(),
    );
    filter_options.insert(
        FILTER_GARAGE.to_string(),
        garages
            .iter()
            .map(|garage| FilterOption::new(garage.id.to_string(), garage.name.clone()))
            .collect(),
    );

    let selected = BTreeMap::from([
        (
            FILTER_STATUS.to_string(),
            controller.filters().selected_ids(FILTER_STATUS),
        ),
        (
            FILTER_GARAGE.to_string(),
            controller.filters().selected_ids(FILTER_GARAGE),
        ),
    ]);

    let search_query =
        Some(controller.search_term().to_string()).filter(|term| !term.is_empty());
    let query = controller.query();

    Ok(FleetPageData {
        vehicles: controller.into_paginated(),
        filter_options,
        selected,
        search_query,
        year_min: query.year_min,
        year_max: query.year_max,
        garages,
    })
}

/// Validates the add-vehicle form and persists a new vehicle record.
pub fn add_vehicle<R>(repo: &R, ctx: &AccessContext, form: AddVehicleForm) -> ServiceResult<()>
where
    R: VehicleWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    let new_vehicle = form.to_new_vehicle(ctx.user.org_id)?;

    repo.create_vehicles(&[new_vehicle]).map_err(|err| {
        log::error!("Failed to add a vehicle: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Parses the uploaded CSV file and creates vehicle records in bulk.
pub fn upload_vehicles<R>(
    repo: &R,
    ctx: &AccessContext,
    form: &mut UploadVehiclesForm,
) -> ServiceResult<usize>
where
    R: VehicleWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let vehicles: Vec<NewVehicle> = form.parse(ctx.user.org_id).map_err(|err| {
        log::error!("Failed to parse vehicles: {err}");
        ServiceError::Form("Ошибка при разборе CSV-файла".to_string())
    })?;

    repo.create_vehicles(&vehicles).map_err(|err| {
        log::error!("Failed to add vehicles: {err}");
        ServiceError::from(err)
    })
}

/// Deletes a vehicle after checking it belongs to the caller's organization.
pub fn delete_vehicle<R>(repo: &R, ctx: &AccessContext, vehicle_id: i32) -> ServiceResult<()>
where
    R: VehicleReader + VehicleWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_vehicle_by_id(vehicle_id, ctx.user.org_id)? {
        Some(_) => repo.delete_vehicle(vehicle_id).map_err(ServiceError::from),
        None => Err(ServiceError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::AuthenticatedUser;
    use crate::repository::demo::DemoRepository;

    fn ctx(roles: &[&str]) -> AccessContext {
        AccessContext::new(
            AuthenticatedUser {
                email: "ops@example.com".into(),
                name: "Ops".into(),
                org_id: 1,
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
            vec![],
        )
    }

    #[test]
    fn fleet_page_requires_the_access_role() {
        let result = load_fleet_page(&DemoRepository, &ctx(&[]), FleetListParams::default());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn fleet_page_lists_the_first_page() {
        let data = load_fleet_page(&DemoRepository, &ctx(&["fleet"]), FleetListParams::default())
            .unwrap();
        assert_eq!(data.vehicles.total, 45);
        assert_eq!(data.vehicles.last_page, 3);
        assert_eq!(data.vehicles.items.len(), DEFAULT_ITEMS_PER_PAGE);
        assert!(data.filter_options.contains_key(FILTER_STATUS));
    }

    #[test]
    fn toggling_a_status_filter_resets_the_page() {
        let params = FleetListParams {
            page: Some(3),
            toggle: Some("status:available".into()),
            ..FleetListParams::default()
        };
        let data = load_fleet_page(&DemoRepository, &ctx(&["fleet"]), params).unwrap();

        assert_eq!(data.vehicles.page, 1);
        assert_eq!(
            data.selected.get(FILTER_STATUS),
            Some(&vec!["available".to_string()])
        );
        assert!(data.vehicles.total < 45);
    }

    #[test]
    fn committing_a_search_narrows_and_echoes_the_term() {
        let params = FleetListParams {
            page: Some(2),
            pending_q: Some("1HGCM82633A000007".into()),
            ..FleetListParams::default()
        };
        let data = load_fleet_page(&DemoRepository, &ctx(&["fleet"]), params).unwrap();

        assert_eq!(data.vehicles.total, 1);
        assert_eq!(data.vehicles.page, 1);
        assert_eq!(data.search_query.as_deref(), Some("1HGCM82633A000007"));
    }

    #[test]
    fn clearing_filters_restores_the_full_fleet() {
        let params = FleetListParams {
            q: Some("kamaz".into()),
            status: vec!["retired".into()],
            year_min: Some("2015".into()),
            clear: Some(1),
            ..FleetListParams::default()
        };
        let data = load_fleet_page(&DemoRepository, &ctx(&["fleet"]), params).unwrap();

        assert_eq!(data.vehicles.total, 45);
        assert_eq!(data.search_query, None);
        assert_eq!(data.year_min, None);
        assert!(data.selected.values().all(|ids| ids.is_empty()));
    }

    #[test]
    fn year_range_restricts_the_listing() {
        let params = FleetListParams {
            year_min: Some("2020".into()),
            year_max: Some("2022".into()),
            ..FleetListParams::default()
        };
        let data = load_fleet_page(&DemoRepository, &ctx(&["fleet"]), params).unwrap();

        assert!(data.vehicles.total > 0);
        assert!(data.vehicles.total < 45);
        assert_eq!(data.year_min, Some(2020));
        assert_eq!(data.year_max, Some(2022));
    }
}
