use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::drivers::{AddDriverForm, UpdateDriverForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, redirect, service_error_response};
use crate::services::drivers as driver_service;
use crate::services::settings::load_access_context;

#[get("/drivers")]
pub async fn show_drivers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match driver_service::load_drivers_page(repo.get_ref(), &ctx) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &ctx.user,
                "drivers",
                &server_config.auth_service_url,
            );
            context.insert("drivers", &data.drivers);

            render_template(&tera, "drivers/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/driver/add")]
pub async fn add_driver(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddDriverForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/drivers"),
    };

    match driver_service::add_driver(repo.get_ref(), &ctx, form) {
        Ok(_) => {
            FlashMessage::success("Водитель добавлен.".to_string()).send();
            redirect("/drivers")
        }
        Err(err) => service_error_response(err, "/drivers"),
    }
}

#[post("/driver/save")]
pub async fn save_driver(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateDriverForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/drivers"),
    };

    match driver_service::update_driver(repo.get_ref(), &ctx, form) {
        Ok(()) => {
            FlashMessage::success("Изменения сохранены.".to_string()).send();
            redirect("/drivers")
        }
        Err(err) => service_error_response(err, "/drivers"),
    }
}
