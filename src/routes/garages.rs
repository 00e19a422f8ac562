use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::garages::GarageListParams;
use crate::forms::garages::{AddGarageForm, UpdateGarageForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, redirect, service_error_response};
use crate::services::garages as garage_service;
use crate::services::settings::load_access_context;

#[get("/garages")]
pub async fn show_garages(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: GarageListParams =
        serde_html_form::from_str(req.query_string()).unwrap_or_default();

    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match garage_service::load_garage_page(repo.get_ref(), &ctx, params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &ctx.user,
                "garages",
                &server_config.auth_service_url,
            );
            context.insert("garages", &data.garages);
            context.insert("filter_options", &data.filter_options);
            context.insert("selected", &data.selected);
            context.insert("search_query", &data.search_query);

            render_template(&tera, "garages/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/garage/add")]
pub async fn add_garage(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddGarageForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/garages"),
    };

    match garage_service::add_garage(repo.get_ref(), &ctx, form) {
        Ok(_) => {
            FlashMessage::success("Гараж добавлен.".to_string()).send();
            redirect("/garages")
        }
        Err(err) => service_error_response(err, "/garages"),
    }
}

#[post("/garage/save")]
pub async fn save_garage(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateGarageForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/garages"),
    };

    match garage_service::update_garage(repo.get_ref(), &ctx, form) {
        Ok(()) => {
            FlashMessage::success("Изменения сохранены.".to_string()).send();
            redirect("/garages")
        }
        Err(err) => service_error_response(err, "/garages"),
    }
}
