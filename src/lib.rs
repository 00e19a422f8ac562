use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::db::establish_connection_pool;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::api::api_v1_vehicles;
use crate::routes::billing::{issue_invoice, set_invoice_status, show_billing};
use crate::routes::drivers::{add_driver, save_driver, show_drivers};
use crate::routes::fleet::{add_vehicle, delete_vehicle, show_fleet, vehicles_upload};
use crate::routes::garages::{add_garage, save_garage, show_garages};
use crate::routes::requests::{add_request, set_request_status, show_requests};
use crate::routes::screening::{add_screening, show_screening};
use crate::routes::settings::{rotate_api_key, save_settings, show_settings};
use crate::routes::signup::{
    confirm_signup, show_signup, submit_fleet, submit_organization, submit_plan,
};
use crate::routes::vehicle::{add_maintenance, assign_drivers, save_vehicle, show_vehicle};
use crate::routes::{logout, not_assigned};

pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod listing;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "fleet";
pub const SERVICE_ADMIN_ROLE: &str = "fleet_admin";
pub const SERVICE_DISPATCHER_ROLE: &str = "fleet_dispatcher";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_signup)
            .service(submit_plan)
            .service(submit_fleet)
            .service(submit_organization)
            .service(confirm_signup)
            .service(not_assigned)
            .service(web::scope("/api").service(api_v1_vehicles))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_fleet)
                    .service(add_vehicle)
                    .service(vehicles_upload)
                    .service(delete_vehicle)
                    .service(show_vehicle)
                    .service(save_vehicle)
                    .service(add_maintenance)
                    .service(assign_drivers)
                    .service(show_garages)
                    .service(add_garage)
                    .service(save_garage)
                    .service(show_drivers)
                    .service(add_driver)
                    .service(save_driver)
                    .service(show_requests)
                    .service(add_request)
                    .service(set_request_status)
                    .service(show_screening)
                    .service(add_screening)
                    .service(show_billing)
                    .service(issue_invoice)
                    .service(set_invoice_status)
                    .service(show_settings)
                    .service(save_settings)
                    .service(rotate_api_key)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
