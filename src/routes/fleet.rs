use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::fleet::FleetListParams;
use crate::forms::fleet::{AddVehicleForm, UploadVehiclesForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, redirect, service_error_response};
use crate::services::fleet as fleet_service;
use crate::services::settings::load_access_context;

#[get("/")]
pub async fn show_fleet(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params: FleetListParams =
        serde_html_form::from_str(req.query_string()).unwrap_or_default();

    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match fleet_service::load_fleet_page(repo.get_ref(), &ctx, params) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &ctx.user,
                "fleet",
                &server_config.auth_service_url,
            );
            context.insert("vehicles", &data.vehicles);
            context.insert("filter_options", &data.filter_options);
            context.insert("selected", &data.selected);
            context.insert("search_query", &data.search_query);
            context.insert("year_min", &data.year_min);
            context.insert("year_max", &data.year_max);
            context.insert("garages", &data.garages);

            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/vehicle/add")]
pub async fn add_vehicle(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddVehicleForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match fleet_service::add_vehicle(repo.get_ref(), &ctx, form) {
        Ok(()) => {
            FlashMessage::success("Автомобиль добавлен.".to_string()).send();
            redirect("/")
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/vehicles/upload")]
pub async fn vehicles_upload(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadVehiclesForm>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match fleet_service::upload_vehicles(repo.get_ref(), &ctx, &mut form) {
        Ok(count) => {
            FlashMessage::success(format!("Автомобили добавлены: {count}.")).send();
            redirect("/")
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/vehicle/{vehicle_id}/delete")]
pub async fn delete_vehicle(
    vehicle_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(err) => return service_error_response(err, "/"),
    };

    match fleet_service::delete_vehicle(repo.get_ref(), &ctx, vehicle_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Автомобиль удалён.".to_string()).send();
            redirect("/")
        }
        Err(err) => service_error_response(err, "/"),
    }
}
