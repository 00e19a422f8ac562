use std::collections::BTreeMap;

use validator::Validate;

use crate::domain::order::{Invoice, InvoiceStatus, NewInvoice, OrderStatus};
use crate::domain::organization::MODULE_BILLING;
use crate::dto::ListAction;
use crate::dto::billing::{BillingPageData, InvoiceListParams};
use crate::forms::billing::{IssueInvoiceForm, SetInvoiceStatusForm};
use crate::listing::{
    DEFAULT_ITEMS_PER_PAGE, FilterOption, FilterOptions, ListController, ListingResult, Page,
    PageFetcher, PageMeta, QueryParams,
};
use crate::models::auth::AccessContext;
use crate::repository::{
    InvoiceListQuery, InvoiceReader, InvoiceWriter, OrderListQuery, OrderReader,
};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

pub const FILTER_STATUS: &str = "status";

/// Adapts the invoice repository to the list-page fetch contract.
pub struct InvoicePages<'a, R: ?Sized> {
    repo: &'a R,
    org_id: i32,
}

impl<'a, R: ?Sized> InvoicePages<'a, R> {
    pub fn new(repo: &'a R, org_id: i32) -> Self {
        Self { repo, org_id }
    }
}

impl<R> PageFetcher for InvoicePages<'_, R>
where
    R: InvoiceReader + ?Sized,
{
    type Item = Invoice;

    fn fetch_page(&self, query: &QueryParams) -> ListingResult<Page<Invoice>> {
        let mut list_query = InvoiceListQuery::new(self.org_id);

        if let Some(ids) = query.filter_ids(FILTER_STATUS) {
            list_query =
                list_query.statuses(ids.iter().filter_map(|id| id.parse().ok()).collect());
        }

        let (total, mut items) = self
            .repo
            .list_invoices(list_query.clone().paginate(query.page, query.size))?;

        let meta = PageMeta::for_page(query.page, query.size, total);
        if meta.current_page != query.page {
            items = self
                .repo
                .list_invoices(list_query.paginate(meta.current_page, query.size))?
                .1;
        }

        Ok(Page { items, meta })
    }
}

fn status_name(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Draft => "Черновик",
        InvoiceStatus::Issued => "Выставлен",
        InvoiceStatus::Paid => "Оплачен",
        InvoiceStatus::Void => "Аннулирован",
    }
}

/// Loads the billing page. The whole page is gated by the `billing` module.
pub fn load_billing_page<R>(
    repo: &R,
    ctx: &AccessContext,
    params: InvoiceListParams,
) -> ServiceResult<BillingPageData>
where
    R: InvoiceReader + OrderReader + ?Sized,
{
    if !ctx.has_role(SERVICE_ACCESS_ROLE) || !ctx.module_enabled(MODULE_BILLING) {
        return Err(ServiceError::Unauthorized);
    }
    let org_id = ctx.user.org_id;

    let mut controller =
        ListController::new(InvoicePages::new(repo, org_id), DEFAULT_ITEMS_PER_PAGE);
    controller.restore(params.snapshot());

    match params.action() {
        ListAction::Toggle {
            category,
            option_id,
        } => controller.toggle_filter_option(&category, &option_id)?,
        ListAction::ClearFilters => controller.clear_all_filters()?,
        ListAction::CommitSearch(_) | ListAction::None => controller.refresh()?,
    }

    let mut filter_options = FilterOptions::new();
    filter_options.insert(
        FILTER_STATUS.to_string(),
        InvoiceStatus::ALL
            .iter()
            .map(|status| FilterOption::new(status.as_str(), status_name(*status)))
            .collect(),
    );

    let selected = BTreeMap::from([(
        FILTER_STATUS.to_string(),
        controller.filters().selected_ids(FILTER_STATUS),
    )]);

    let (_, billable_orders) = repo.list_orders(
        OrderListQuery::new(org_id).statuses(vec![OrderStatus::Completed]),
    )?;

    Ok(BillingPageData {
        invoices: controller.into_paginated(),
        filter_options,
        selected,
        billable_orders,
    })
}

/// Creates a draft invoice for a completed order.
pub fn issue_invoice<R>(
    repo: &R,
    ctx: &AccessContext,
    form: IssueInvoiceForm,
) -> ServiceResult<Invoice>
where
    R: OrderReader + InvoiceWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) || !ctx.module_enabled(MODULE_BILLING) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Ошибка валидации формы".to_string()));
    }

    let order = repo
        .get_order_by_id(form.order_id, ctx.user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    if order.status != OrderStatus::Completed {
        return Err(ServiceError::Form(
            "Счёт можно выставить только по завершённой заявке".to_string(),
        ));
    }

    let new_invoice = NewInvoice::new(ctx.user.org_id, order.id, form.amount_cents);
    repo.create_invoice(&new_invoice).map_err(|err| {
        log::error!("Failed to issue invoice: {err}");
        ServiceError::from(err)
    })
}

/// Moves an invoice between statuses (issue a draft, mark paid, void).
pub fn set_invoice_status<R>(
    repo: &R,
    ctx: &AccessContext,
    form: SetInvoiceStatusForm,
) -> ServiceResult<Invoice>
where
    R: InvoiceWriter + ?Sized,
{
    if !ctx.has_role(SERVICE_ADMIN_ROLE) || !ctx.module_enabled(MODULE_BILLING) {
        return Err(ServiceError::Unauthorized);
    }

    let status: InvoiceStatus = form
        .status
        .parse()
        .map_err(|_| ServiceError::Form("Недопустимый статус счёта".to_string()))?;

    repo.set_invoice_status(form.id, status).map_err(|err| {
        log::error!("Failed to update invoice status: {err}");
        ServiceError::from(err)
    })
}
