use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::requests::OrderListParams;
use crate::forms::requests::{AddOrderForm, SetOrderStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, redirect, service_error_response};
use crate::services::requests as order_service;
use crate::services::settings::load_access_context;

#[get("/requests")]
pub async fn show_requests(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: OrderListParams =
        serde_html_form::from_str(req.query_string()).unwrap_or_default();

    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match order_service::load_order_page(repo.get_ref(), &ctx, params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &ctx.user,
                "requests",
                &server_config.auth_service_url,
            );
            context.insert("orders", &data.orders);
            context.insert("filter_options", &data.filter_options);
            context.insert("selected", &data.selected);
            context.insert("search_query", &data.search_query);
            context.insert("vehicles", &data.vehicles);
            context.insert("drivers", &data.drivers);

            render_template(&tera, "requests/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/request/add")]
pub async fn add_request(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddOrderForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/requests"),
    };

    match order_service::add_order(repo.get_ref(), &ctx, form) {
        Ok(order) => {
            FlashMessage::success(format!("Заявка {} создана.", order.reference)).send();
            redirect("/requests")
        }
        Err(err) => service_error_response(err, "/requests"),
    }
}

#[post("/request/status")]
pub async fn set_request_status(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SetOrderStatusForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/requests"),
    };

    match order_service::set_order_status(repo.get_ref(), &ctx, form) {
        Ok(_) => {
            FlashMessage::success("Статус заявки обновлён.".to_string()).send();
            redirect("/requests")
        }
        Err(err) => service_error_response(err, "/requests"),
    }
}
