use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::settings::SettingsForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, redirect, service_error_response};
use crate::services::settings as settings_service;

#[get("/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let ctx = match settings_service::load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match settings_service::load_settings_page(repo.get_ref(), &ctx) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &ctx.user,
                "settings",
                &server_config.auth_service_url,
            );
            context.insert("organization", &data.organization);
            context.insert("modules", &data.modules);

            render_template(&tera, "settings/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

/// The module checkboxes arrive as repeated `modules` keys, which the
/// default form extractor cannot represent; the body is parsed explicitly.
#[post("/settings/save")]
pub async fn save_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: String,
) -> HttpResponse {
    let form: SettingsForm = match serde_html_form::from_str(&body) {
        Ok(form) => form,
        Err(e) => {
            log::error!("Failed to parse settings form: {e}");
            FlashMessage::error("Ошибка валидации формы".to_string()).send();
            return redirect("/settings");
        }
    };

    let ctx = match settings_service::load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/settings"),
    };

    match settings_service::save_settings(repo.get_ref(), &ctx, form) {
        Ok(_) => {
            FlashMessage::success("Настройки сохранены.".to_string()).send();
            redirect("/settings")
        }
        Err(err) => service_error_response(err, "/settings"),
    }
}

#[post("/settings/api_key")]
pub async fn rotate_api_key(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match settings_service::load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/settings"),
    };

    match settings_service::rotate_api_key(repo.get_ref(), &ctx) {
        Ok(_) => {
            FlashMessage::success("Ключ API обновлён.".to_string()).send();
            redirect("/settings")
        }
        Err(err) => service_error_response(err, "/settings"),
    }
}
