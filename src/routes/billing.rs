use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::billing::InvoiceListParams;
use crate::forms::billing::{IssueInvoiceForm, SetInvoiceStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, redirect, service_error_response};
use crate::services::billing as billing_service;
use crate::services::settings::load_access_context;

#[get("/billing")]
pub async fn show_billing(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: InvoiceListParams =
        serde_html_form::from_str(req.query_string()).unwrap_or_default();

    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match billing_service::load_billing_page(repo.get_ref(), &ctx, params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &ctx.user,
                "billing",
                &server_config.auth_service_url,
            );
            context.insert("invoices", &data.invoices);
            context.insert("filter_options", &data.filter_options);
            context.insert("selected", &data.selected);
            context.insert("billable_orders", &data.billable_orders);

            render_template(&tera, "billing/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/invoice/issue")]
pub async fn issue_invoice(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<IssueInvoiceForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/billing"),
    };

    match billing_service::issue_invoice(repo.get_ref(), &ctx, form) {
        Ok(invoice) => {
            FlashMessage::success(format!("Счёт {} создан.", invoice.number)).send();
            redirect("/billing")
        }
        Err(err) => service_error_response(err, "/billing"),
    }
}

#[post("/invoice/status")]
pub async fn set_invoice_status(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SetInvoiceStatusForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/billing"),
    };

    match billing_service::set_invoice_status(repo.get_ref(), &ctx, form) {
        Ok(_) => {
            FlashMessage::success("Статус счёта обновлён.".to_string()).send();
            redirect("/billing")
        }
        Err(err) => service_error_response(err, "/billing"),
    }
}
