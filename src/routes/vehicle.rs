use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::vehicle::VehicleMaintenanceQuery;
use crate::forms::vehicle::{AddMaintenanceForm, AssignDriversForm, SaveVehicleForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, redirect, service_error_response};
use crate::services::settings::load_access_context;
use crate::services::vehicle as vehicle_service;

#[get("/vehicle/{vehicle_id}")]
pub async fn show_vehicle(
    vehicle_id: web::Path<i32>,
    query: web::Query<VehicleMaintenanceQuery>,
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

    match vehicle_service::load_vehicle_page(
        repo.get_ref(),
        &ctx,
        vehicle_id.into_inner(),
        query.into_inner(),
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &ctx.user,
                "fleet",
                &server_config.auth_service_url,
            );
            context.insert("vehicle", &data.vehicle);
            context.insert("maintenance", &data.maintenance);
            context.insert("assigned_drivers", &data.assigned_drivers);
            context.insert("all_drivers", &data.all_drivers);
            context.insert("garages", &data.garages);

            render_template(&tera, "vehicle/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/vehicle/save")]
pub async fn save_vehicle(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveVehicleForm>,
) -> impl Responder {
    let back_url = format!("/vehicle/{}", form.id);

    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match vehicle_service::save_vehicle(repo.get_ref(), &ctx, form) {
        Ok(()) => {
            FlashMessage::success("Изменения сохранены.".to_string()).send();
            redirect(&back_url)
        }
        Err(err) => service_error_response(err, &back_url),
    }
}

#[post("/vehicle/maintenance/add")]
pub async fn add_maintenance(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddMaintenanceForm>,
) -> impl Responder {
    let back_url = format!("/vehicle/{}", form.vehicle_id);

    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match vehicle_service::add_maintenance_record(repo.get_ref(), &ctx, form) {
        Ok(()) => {
            FlashMessage::success("Запись о ремонте добавлена.".to_string()).send();
            redirect(&back_url)
        }
        Err(err) => service_error_response(err, &back_url),
    }
}

/// The driver checkboxes arrive as repeated `driver_ids` keys, which the
/// default form extractor cannot represent; the body is parsed explicitly.
#[post("/vehicle/assign_drivers")]
pub async fn assign_drivers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: String,
) -> HttpResponse {
    let form: AssignDriversForm = match serde_html_form::from_str(&body) {
        Ok(form) => form,
        Err(e) => {
            log::error!("Failed to parse assignment form: {e}");
            FlashMessage::error("Ошибка валидации формы".to_string()).send();
            return redirect("/");
        }
    };
    let back_url = format!("/vehicle/{}", form.vehicle_id);

    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match vehicle_service::assign_drivers(repo.get_ref(), &ctx, form) {
        Ok(_) => {
            FlashMessage::success("Водители назначены.".to_string()).send();
            redirect(&back_url)
        }
        Err(err) => service_error_response(err, &back_url),
    }
}
