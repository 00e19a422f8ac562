//! Authenticated user extraction and per-request access context.
//!
//! The external auth service issues a JWT which `actix-identity` carries in
//! the session cookie. Handlers receive an [`AuthenticatedUser`] extractor;
//! services receive an [`AccessContext`] built explicitly from the user and
//! the organization's enabled modules, so nothing reads ambient state.

use std::future::Future;
use std::pin::Pin;

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, web};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// JWT claims issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub org_id: i32,
    pub roles: Vec<String>,
    pub exp: i64,
}

/// User decoded from the identity token of the current request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub email: String,
    pub name: String,
    pub org_id: i32,
    pub roles: Vec<String>,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            name: claims.name,
            org_id: claims.org_id,
            roles: claims.roles,
        }
    }
}

impl AuthenticatedUser {
    pub fn decode(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let data = jsonwebtoken::decode::<Claims>(token, &decoding_key, &Validation::default())?;
        Ok(data.claims.into())
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload);
        let req = req.clone();

        Box::pin(async move {
            let identity = identity.await?;
            let token = identity
                .id()
                .map_err(|_| ErrorUnauthorized("missing identity"))?;
            let config = req
                .app_data::<web::Data<ServerConfig>>()
                .ok_or_else(|| ErrorUnauthorized("server config not available"))?;

            AuthenticatedUser::decode(&token, &config.secret).map_err(|e| {
                log::debug!("Rejected identity token: {e}");
                ErrorUnauthorized("invalid identity")
            })
        })
    }
}

/// Everything a page needs to decide whether the user may see it: the user
/// plus the organization's enabled optional modules. Built per request and
/// passed into services explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessContext {
    pub user: AuthenticatedUser,
    pub enabled_modules: Vec<String>,
}

impl AccessContext {
    pub fn new(user: AuthenticatedUser, enabled_modules: Vec<String>) -> Self {
        Self {
            user,
            enabled_modules,
        }
    }

    pub fn module_enabled(&self, module: &str) -> bool {
        self.enabled_modules.iter().any(|m| m == module)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.user.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            email: "ops@example.com".into(),
            name: "Ops".into(),
            org_id: 1,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn access_context_checks_roles_and_modules() {
        let ctx = AccessContext::new(user(&["fleet", "fleet_admin"]), vec!["billing".into()]);
        assert!(ctx.has_role("fleet"));
        assert!(!ctx.has_role("fleet_dispatcher"));
        assert!(ctx.module_enabled("billing"));
        assert!(!ctx.module_enabled("screening"));
    }

    #[test]
    fn decode_round_trip() {
        use jsonwebtoken::{EncodingKey, Header};

        let claims = Claims {
            sub: "ops@example.com".into(),
            email: "ops@example.com".into(),
            name: "Ops".into(),
            org_id: 7,
            roles: vec!["fleet".into()],
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let user = AuthenticatedUser::decode(&token, "secret").unwrap();
        assert_eq!(user.org_id, 7);
        assert_eq!(user.roles, vec!["fleet".to_string()]);

        assert!(AuthenticatedUser::decode(&token, "wrong").is_err());
    }
}
