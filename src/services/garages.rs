use std::collections::BTreeMap;

use validator::Validate;

use crate::domain::garage::Garage;
use crate::dto::ListAction;
use crate::dto::garages::{GarageListParams, GaragePageData};
use crate::forms::garages::{AddGarageForm, UpdateGarageForm};
use crate::listing::{
    DEFAULT_ITEMS_PER_PAGE, FilterOption, FilterOptions, ListController, ListingResult, Page,
    PageFetcher, PageMeta, QueryParams,
};
use crate::models::auth::AccessContext;
use crate::repository::{GarageListQuery, GarageReader, GarageWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub const FILTER_CITY: &str = "city";

/// Adapts the garage repository to the list-page fetch contract.
pub struct GaragePages<'a, R: ?Sized> {
    repo: &'a R,
    org_id: i32,
}

impl<'a, R: ?Sized> GaragePages<'a, R> {
    pub fn new(repo: &'a R, org_id: i32) -> Self {
        Self { repo, org_id }
    }
}

impl<R> PageFetcher for GaragePages<'_, R>
where
    R: GarageReader + ?Sized,
{
    type Item = Garage;

    fn fetch_page(&self, query: &QueryParams) -> ListingResult<Page<Garage>> {
        let mut list_query = GarageListQuery::new(self.org_id);

        if let Some(search) = &query.search {
            list_query = list_query.search(search.clone());
        }
        if let Some(cities) = query.filter_ids(FILTER_CITY) {
            list_query = list_query.cities(cities);
        }

        let (total, mut items) = self
            .repo
            .list_garages(list_query.clone().paginate(query.page, query.size))?;

        let meta = PageMeta::for_page(query.page, query.size, total);
        if meta.current_page != query.page {
            items = self
                .repo
                .list_garages(list_query.paginate(meta.current_page, query.size))?
                .1;
        }

        Ok(Page { items, meta })
    }
}

/// Loads the garages list, applying the interaction the request carries.
pub fn load_garage_page<R>(
    repo: &R,
    ctx: &AccessContext,
    params: GarageListParams,
) -> ServiceResult<GaragePageData>
where
    R: GarageReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }
    let org_id = ctx.user.org_id;

    let mut controller =
        ListController::new(GaragePages::new(repo, org_id), DEFAULT_ITEMS_PER_PAGE);
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

    let cities = repo.list_garage_cities(org_id)?;
    let mut filter_options = FilterOptions::new();
    filter_options.insert(
        FILTER_CITY.to_string(),
        cities
            .into_iter()
            .map(|city| FilterOption::new(city.clone(), city))
            .collect(),
    );

    let selected = BTreeMap::from([(
        FILTER_CITY.to_string(),
        controller.filters().selected_ids(FILTER_CITY),
    )]);
    let search_query =
        Some(controller.search_term().to_string()).filter(|term| !term.is_empty());

    Ok(GaragePageData {
        garages: controller.into_paginated(),
        filter_options,
        selected,
        search_query,
    })
}

/// Validates the add-garage form and persists a new garage.
pub fn add_garage<R>(repo: &R, ctx: &AccessContext, form: AddGarageForm) -> ServiceResult<Garage>
where
    R: GarageWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    let new_garage = form.to_new_garage(ctx.user.org_id)?;
    repo.create_garage(&new_garage).map_err(|err| {
        log::error!("Failed to add a garage: {err}");
        ServiceError::from(err)
    })
}

/// Validates the edit form and applies the updates to the garage.
pub fn update_garage<R>(repo: &R, ctx: &AccessContext, form: UpdateGarageForm) -> ServiceResult<()>
where
    R: GarageReader + GarageWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    if repo
        .get_garage_by_id(form.id, ctx.user.org_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let updates = form.to_update_garage()?;
    repo.update_garage(form.id, &updates).map_err(|err| {
        log::error!("Failed to update garage: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::AuthenticatedUser;
    use crate::repository::demo::DemoRepository;

    fn ctx() -> AccessContext {
        AccessContext::new(
            AuthenticatedUser {
                email: "ops@example.com".into(),
                name: "Ops".into(),
                org_id: 1,
                roles: vec!["fleet".into()],
            },
            vec![],
        )
    }

    #[test]
    fn garages_fit_on_a_single_page() {
        let data = load_garage_page(&DemoRepository, &ctx(), GarageListParams::default()).unwrap();
        assert_eq!(data.garages.last_page, 1);
        assert!(!data.garages.has_next);
        assert!(data.filter_options.contains_key(FILTER_CITY));
    }

    #[test]
    fn city_toggle_filters_and_echoes_selection() {
        let params = GarageListParams {
            toggle: Some("city:Москва".into()),
            ..GarageListParams::default()
        };
        let data = load_garage_page(&DemoRepository, &ctx(), params).unwrap();
        assert_eq!(data.garages.total, 3);
        assert_eq!(data.selected.get(FILTER_CITY), Some(&vec!["Москва".to_string()]));
    }
}
