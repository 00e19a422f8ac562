use actix_identity::Identity;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, post};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceError;

pub mod api;
pub mod billing;
pub mod drivers;
pub mod fleet;
pub mod garages;
pub mod requests;
pub mod screening;
pub mod settings;
pub mod signup;
pub mod vehicle;

pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

/// 303 redirect to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Maps flash levels onto the alert classes the templates use.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context entries shared by every page: alerts, current user, active page
/// marker, and the auth-service home link.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(e) => {
            log::error!("Failed to render template {name}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Standard translation of service failures: authorization problems land on
/// the not-assigned page, user mistakes flash and return to the page they
/// came from, anything else is a 500. Fetch-layer errors never escape here
/// uncaught.
pub fn service_error_response(err: ServiceError, back_url: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => redirect("/na"),
        ServiceError::NotFound => {
            FlashMessage::error("Запись не найдена.").send();
            redirect(back_url)
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
            redirect(back_url)
        }
        ServiceError::Internal(message) => {
            log::error!("Service failure: {message}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: actix_web::web::Data<crate::models::config::ServerConfig>,
    tera: actix_web::web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );

    render_template(&tera, "main/not_assigned.html", &context)
}
