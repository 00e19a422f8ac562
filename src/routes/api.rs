use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::api as api_service;
use crate::services::settings::load_access_context;
use crate::services::ServiceError;

#[derive(Debug, Deserialize)]
struct ApiV1VehiclesQueryParams {
    query: String,
}

#[get("/v1/vehicles")]
pub async fn api_v1_vehicles(
    params: web::Query<ApiV1VehiclesQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ctx = match load_access_context(repo.get_ref(), user) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("Failed to load access context: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match api_service::search_vehicles(repo.get_ref(), &ctx, &params.query) {
        Ok(vehicles) => HttpResponse::Ok().json(vehicles),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(e) => {
            log::error!("Failed to list vehicles: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
