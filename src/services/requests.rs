use std::collections::BTreeMap;

use validator::Validate;

use crate::domain::order::{Order, OrderKind, OrderStatus};
use crate::dto::ListAction;
use crate::dto::requests::{OrderListParams, OrderPageData};
use crate::forms::requests::{AddOrderForm, SetOrderStatusForm};
use crate::listing::{
    DEFAULT_ITEMS_PER_PAGE, FilterOption, FilterOptions, ListController, ListingResult, Page,
    PageFetcher, PageMeta, QueryParams,
};
use crate::models::auth::AccessContext;
use crate::repository::{
    DriverReader, OrderListQuery, OrderReader, OrderWriter, VehicleListQuery, VehicleReader,
};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, SERVICE_DISPATCHER_ROLE};

/// Orders are managed by dispatchers; admins can always step in.
fn can_manage_orders(ctx: &AccessContext) -> bool {
    ctx.has_role(SERVICE_DISPATCHER_ROLE) || ctx.has_role(SERVICE_ADMIN_ROLE)
}

pub const FILTER_STATUS: &str = "status";
pub const FILTER_KIND: &str = "kind";

/// Adapts the order repository to the list-page fetch contract.
pub struct OrderPages<'a, R: ?Sized> {
    repo: &'a R,
    org_id: i32,
}

impl<'a, R: ?Sized> OrderPages<'a, R> {
    pub fn new(repo: &'a R, org_id: i32) -> Self {
        Self { repo, org_id }
    }
}

impl<R> PageFetcher for OrderPages<'_, R>
where
    R: OrderReader + ?Sized,
{
    type Item = Order;

    fn fetch_page(&self, query: &QueryParams) -> ListingResult<Page<Order>> {
        let mut list_query = OrderListQuery::new(self.org_id);

        if let Some(search) = &query.search {
            list_query = list_query.search(search.clone());
        }
        if let Some(ids) = query.filter_ids(FILTER_STATUS) {
            list_query = list_query.statuses(ids.iter().filter_map(|id| id.parse().ok()).collect());
        }
        if let Some(ids) = query.filter_ids(FILTER_KIND) {
            list_query = list_query.kinds(ids.iter().filter_map(|id| id.parse().ok()).collect());
        }

        let (total, mut items) = self
            .repo
            .list_orders(list_query.clone().paginate(query.page, query.size))?;

        let meta = PageMeta::for_page(query.page, query.size, total);
        if meta.current_page != query.page {
            items = self
                .repo
                .list_orders(list_query.paginate(meta.current_page, query.size))?
                .1;
        }

        Ok(Page { items, meta })
    }
}

fn status_name(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Новая",
        OrderStatus::Approved => "Подтверждена",
        OrderStatus::InProgress => "В работе",
        OrderStatus::Completed => "Завершена",
        OrderStatus::Cancelled => "Отменена",
    }
}

fn kind_name(kind: OrderKind) -> &'static str {
    match kind {
        OrderKind::Delivery => "Доставка",
        OrderKind::Transfer => "Перегон",
        OrderKind::Repair => "Ремонт",
    }
}

/// Loads the requests list, applying the interaction the request carries.
pub fn load_order_page<R>(
    repo: &R,
    ctx: &AccessContext,
    params: OrderListParams,
) -> ServiceResult<OrderPageData>
where
    R: OrderReader + VehicleReader + DriverReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }
    let org_id = ctx.user.org_id;

    let mut controller =
        ListController::new(OrderPages::new(repo, org_id), DEFAULT_ITEMS_PER_PAGE);
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
        FILTER_STATUS.to_string(),
        OrderStatus::ALL
            .iter()
            .map(|status| FilterOption::new(status.as_str(), status_name(*status)))
            .collect(),
    );
    filter_options.insert(
        FILTER_KIND.to_string(),
        OrderKind::ALL
            .iter()
            .map(|kind| FilterOption::new(kind.as_str(), kind_name(*kind)))
            .collect(),
    );

    let selected = BTreeMap::from([
        (
            FILTER_STATUS.to_string(),
            controller.filters().selected_ids(FILTER_STATUS),
        ),
        (
            FILTER_KIND.to_string(),
            controller.filters().selected_ids(FILTER_KIND),
        ),
    ]);
    let search_query =
        Some(controller.search_term().to_string()).filter(|term| !term.is_empty());

    let (_, vehicles) = repo.list_vehicles(VehicleListQuery::new(org_id))?;
    let drivers = repo.list_drivers(org_id)?;

    Ok(OrderPageData {
        orders: controller.into_paginated(),
        filter_options,
        selected,
        search_query,
        vehicles,
        drivers,
    })
}

/// Validates the create-order form and persists a new order.
pub fn add_order<R>(repo: &R, ctx: &AccessContext, form: AddOrderForm) -> ServiceResult<Order>
where
    R: VehicleReader + OrderWriter + ?Sized,
{
    if !can_manage_orders(ctx) {
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

    let new_order = form.to_new_order(ctx.user.org_id)?;
    repo.create_order(&new_order).map_err(|err| {
        log::error!("Failed to add an order: {err}");
        ServiceError::from(err)
    })
}

/// Applies a status change to an order of the caller's organization.
pub fn set_order_status<R>(
    repo: &R,
    ctx: &AccessContext,
    form: SetOrderStatusForm,
) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    if !can_manage_orders(ctx) {
        return Err(ServiceError::Unauthorized);
    }

    if repo
        .get_order_by_id(form.id, ctx.user.org_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let status: OrderStatus = form
        .status
        .parse()
        .map_err(|_| ServiceError::Form("Недопустимый статус заявки".to_string()))?;

    repo.set_order_status(form.id, status).map_err(|err| {
        log::error!("Failed to update order status: {err}");
        ServiceError::from(err)
    })
}
