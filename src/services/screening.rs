use std::collections::BTreeMap;

use validator::Validate;

use crate::domain::organization::MODULE_SCREENING;
use crate::domain::screening::{ScreeningKind, ScreeningLog, ScreeningResult};
use crate::dto::ListAction;
use crate::dto::screening::{ScreeningListParams, ScreeningPageData, ScreeningRow};
use crate::forms::screening::AddScreeningForm;
use crate::listing::{
    DEFAULT_ITEMS_PER_PAGE, FilterOption, FilterOptions, ListController, ListingResult, Page,
    PageFetcher, PageMeta, QueryParams,
};
use crate::models::auth::AccessContext;
use crate::repository::{
    DriverReader, ScreeningListQuery, ScreeningReader, ScreeningWriter,
};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub const FILTER_KIND: &str = "kind";
pub const FILTER_RESULT: &str = "result";

/// Adapts the screening repository to the list-page fetch contract.
pub struct ScreeningPages<'a, R: ?Sized> {
    repo: &'a R,
    org_id: i32,
}

impl<'a, R: ?Sized> ScreeningPages<'a, R> {
    pub fn new(repo: &'a R, org_id: i32) -> Self {
        Self { repo, org_id }
    }
}

impl<R> PageFetcher for ScreeningPages<'_, R>
where
    R: ScreeningReader + ?Sized,
{
    type Item = ScreeningRow;

    fn fetch_page(&self, query: &QueryParams) -> ListingResult<Page<ScreeningRow>> {
        let mut list_query = ScreeningListQuery::new(self.org_id);

        if let Some(search) = &query.search {
            list_query = list_query.search(search.clone());
        }
        if let Some(ids) = query.filter_ids(FILTER_KIND) {
            list_query = list_query.kinds(ids.iter().filter_map(|id| id.parse().ok()).collect());
        }
        if let Some(ids) = query.filter_ids(FILTER_RESULT) {
            list_query = list_query.results(ids.iter().filter_map(|id| id.parse().ok()).collect());
        }

        let (total, mut items) = self
            .repo
            .list_screening_logs(list_query.clone().paginate(query.page, query.size))?;

        let meta = PageMeta::for_page(query.page, query.size, total);
        if meta.current_page != query.page {
            items = self
                .repo
                .list_screening_logs(list_query.paginate(meta.current_page, query.size))?
                .1;
        }

        Ok(Page {
            items: items
                .into_iter()
                .map(|(log, driver)| ScreeningRow { log, driver })
                .collect(),
            meta,
        })
    }
}

fn kind_name(kind: ScreeningKind) -> &'static str {
    match kind {
        ScreeningKind::License => "Водительские права",
        ScreeningKind::Background => "Проверка биографии",
        ScreeningKind::Drug => "Медицинский осмотр",
    }
}

fn result_name(result: ScreeningResult) -> &'static str {
    match result {
        ScreeningResult::Pending => "Ожидает",
        ScreeningResult::Passed => "Пройдена",
        ScreeningResult::Failed => "Провалена",
    }
}

/// Loads the screening log, applying the interaction the request carries.
/// The whole page is gated by the `screening` module.
pub fn load_screening_page<R>(
    repo: &R,
    ctx: &AccessContext,
    params: ScreeningListParams,
) -> ServiceResult<ScreeningPageData>
where
    R: ScreeningReader + DriverReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) || !ctx.module_enabled(MODULE_SCREENING) {
        return Err(ServiceError::Unauthorized);
    }
    let org_id = ctx.user.org_id;

    let mut controller =
        ListController::new(ScreeningPages::new(repo, org_id), DEFAULT_ITEMS_PER_PAGE);
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

    let mut filter_options = FilterOptions::new();
    filter_options.insert(
        FILTER_KIND.to_string(),
        ScreeningKind::ALL
            .iter()
            .map(|kind| FilterOption::new(kind.as_str(), kind_name(*kind)))
            .collect(),
    );
    filter_options.insert(
        FILTER_RESULT.to_string(),
        ScreeningResult::ALL
            .iter()
            .map(|result| FilterOption::new(result.as_str(), result_name(*result)))
            .collect(),
    );

    let selected = BTreeMap::from([
        (
            FILTER_KIND.to_string(),
            controller.filters().selected_ids(FILTER_KIND),
        ),
        (
            FILTER_RESULT.to_string(),
            controller.filters().selected_ids(FILTER_RESULT),
        ),
    ]);
    let search_query =
        Some(controller.search_term().to_string()).filter(|term| !term.is_empty());

    let drivers = repo.list_drivers(org_id)?;

    Ok(ScreeningPageData {
        logs: controller.into_paginated(),
        filter_options,
        selected,
        search_query,
        drivers,
    })
}

/// Validates the form and appends a screening log entry.
pub fn add_screening_log<R>(
    repo: &R,
    ctx: &AccessContext,
    form: AddScreeningForm,
) -> ServiceResult<ScreeningLog>
where
    R: DriverReader + ScreeningWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) || !ctx.module_enabled(MODULE_SCREENING) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    if repo
        .get_driver_by_id(form.driver_id, ctx.user.org_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let log = form.to_new_log(ctx.user.org_id)?;
    repo.create_screening_log(&log).map_err(|err| {
        log::error!("Failed to add screening log: {err}");
        ServiceError::from(err)
    })
}
