use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::signup::SignupWizard;
use crate::dto::signup::SignupPageData;
use crate::forms::signup::{FleetStepForm, OrgStepForm, PlanStepForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{alert_level_to_str, render_template, redirect, service_error_response};
use crate::services::signup as signup_service;

const WIZARD_SESSION_KEY: &str = "signup_wizard";

fn load_wizard(session: &Session) -> SignupWizard {
    session
        .get::<SignupWizard>(WIZARD_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

fn store_wizard(session: &Session, wizard: &SignupWizard) -> bool {
    match session.insert(WIZARD_SESSION_KEY, wizard) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to store signup wizard in session: {e}");
            false
        }
    }
}

#[get("/signup")]
pub async fn show_signup(
    session: Session,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = SignupPageData::new(load_wizard(&session));

    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", "signup");
    context.insert("home_url", &server_config.auth_service_url);
    context.insert("wizard", &data.wizard);
    context.insert("step", &data.step);
    context.insert("quote", &data.quote);
    context.insert("plans", &data.plans);
    context.insert("cycles", &data.cycles);

    render_template(&tera, "signup/index.html", &context)
}

#[post("/signup/plan")]
pub async fn submit_plan(
    session: Session,
    web::Form(form): web::Form<PlanStepForm>,
) -> impl Responder {
    match signup_service::apply_plan_step(load_wizard(&session), form) {
        Ok(wizard) => {
            store_wizard(&session, &wizard);
        }
        Err(err) => return service_error_response(err, "/signup"),
    }
    redirect("/signup")
}

#[post("/signup/fleet")]
pub async fn submit_fleet(
    session: Session,
    web::Form(form): web::Form<FleetStepForm>,
) -> impl Responder {
    match signup_service::apply_fleet_step(load_wizard(&session), form) {
        Ok(wizard) => {
            store_wizard(&session, &wizard);
        }
        Err(err) => return service_error_response(err, "/signup"),
    }
    redirect("/signup")
}

#[post("/signup/organization")]
pub async fn submit_organization(
    session: Session,
    web::Form(form): web::Form<OrgStepForm>,
) -> impl Responder {
    match signup_service::apply_org_step(load_wizard(&session), form) {
        Ok(wizard) => {
            store_wizard(&session, &wizard);
        }
        Err(err) => return service_error_response(err, "/signup"),
    }
    redirect("/signup")
}

#[post("/signup/confirm")]
pub async fn confirm_signup(
    session: Session,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    let wizard = load_wizard(&session);

    match signup_service::confirm_signup(repo.get_ref(), &wizard) {
        Ok(org_id) => {
            session.remove(WIZARD_SESSION_KEY);
            log::info!("Organization {org_id} registered via signup");
            FlashMessage::success(
                "Организация зарегистрирована. Войдите, чтобы продолжить.".to_string(),
            )
            .send();
            redirect(&server_config.auth_service_url)
        }
        Err(err) => service_error_response(err, "/signup"),
    }
}
