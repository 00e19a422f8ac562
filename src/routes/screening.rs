use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::screening::ScreeningListParams;
use crate::forms::screening::AddScreeningForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, redirect, service_error_response};
use crate::services::screening as screening_service;
use crate::services::settings::load_access_context;

#[get("/screening")]
pub async fn show_screening(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: ScreeningListParams =
        serde_html_form::from_str(req.query_string()).unwrap_or_default();

    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match screening_service::load_screening_page(repo.get_ref(), &ctx, params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &ctx.user,
                "screening",
                &server_config.auth_service_url,
            );
            context.insert("logs", &data.logs);
            context.insert("filter_options", &data.filter_options);
            context.insert("selected", &data.selected);
            context.insert("search_query", &data.search_query);
            context.insert("drivers", &data.drivers);

            render_template(&tera, "screening/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/screening/add")]
pub async fn add_screening(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddScreeningForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/screening"),
    };

    match screening_service::add_screening_log(repo.get_ref(), &ctx, form) {
        Ok(_) => {
            FlashMessage::success("Запись о проверке добавлена.".to_string()).send();
            redirect("/screening")
        }
        Err(err) => service_error_response(err, "/screening"),
    }
}
