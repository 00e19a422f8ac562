use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpResponse, test, web};

use fleetdesk::middleware::RedirectUnauthorized;
use fleetdesk::models::config::ServerConfig;

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "fleetdesk.test".into(),
        address: "127.0.0.1".into(),
        port: 8080,
        database_url: ":memory:".into(),
        templates_dir: "templates/**/*.html".into(),
        secret: "0123456789012345678901234567890123456789012345678901234567890123".into(),
        auth_service_url: "https://auth.fleetdesk.test/".into(),
    }
}

#[actix_web::test]
async fn unauthorized_responses_redirect_to_the_auth_service() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(server_config()))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .route(
                        "/private",
                        web::get().to(|| async { HttpResponse::Unauthorized().finish() }),
                    )
                    .route(
                        "/open",
                        web::get().to(|| async { HttpResponse::Ok().body("ok") }),
                    ),
            ),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/private").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("https://auth.fleetdesk.test/")
    );

    let resp = test::call_service(&app, test::TestRequest::get().uri("/open").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
