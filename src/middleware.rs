//! Request middleware.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::{StatusCode, header};
use actix_web::{Error, HttpResponse, web};

use crate::models::config::ServerConfig;

/// Sends browsers with a missing or expired identity to the auth service
/// instead of showing them a bare 401.
pub struct RedirectUnauthorized;

impl<S, B> Transform<S, ServiceRequest> for RedirectUnauthorized
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RedirectUnauthorizedMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectUnauthorizedMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RedirectUnauthorizedMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RedirectUnauthorizedMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let auth_url = req
                .app_data::<web::Data<ServerConfig>>()
                .map(|config| config.auth_service_url.clone())
                .unwrap_or_else(|| "/".to_string());

            let (http_req, payload) = req.into_parts();
            let req = ServiceRequest::from_parts(http_req.clone(), payload);

            let redirect = move || {
                HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, auth_url))
                    .finish()
            };

            match service.call(req).await {
                Ok(res) if res.status() == StatusCode::UNAUTHORIZED => {
                    let (req, _) = res.into_parts();
                    Ok(ServiceResponse::new(req, redirect()).map_into_right_body())
                }
                Ok(res) => Ok(res.map_into_left_body()),
                Err(err) if err.error_response().status() == StatusCode::UNAUTHORIZED => {
                    Ok(ServiceResponse::new(http_req, redirect()).map_into_right_body())
                }
                Err(err) => Err(err),
            }
        })
    }
}
