use std::future::{
    ready,
    Ready,
};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{
    web,
    FromRequest,
    HttpRequest,
};

use crate::auth::{
    AuthError,
    Claims,
    TokenService,
    ADMIN_ROLE,
};
use crate::routes::RouteError;

/// Proof that the request carries a valid admin token.
///
/// Taking it as a handler argument is what makes a route admin only; the
/// request is rejected with 401 before the handler runs otherwise.
#[derive(Debug)]
pub struct AdminToken(pub Claims);

impl AdminToken {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl FromRequest for AdminToken {
    type Error = RouteError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}

fn authorize(req: &HttpRequest) -> Result<AdminToken, RouteError> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| RouteError::Internal {
            message: "Token service is not configured".into(),
        })?;
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let claims = tokens.verify_header(authorization).map_err(|e| {
        tracing::warn!(path = %req.path(), "rejected admin request: {}", e);
        e
    })?;
    if claims.role != ADMIN_ROLE {
        tracing::warn!(path = %req.path(), role = %claims.role, "token without admin role");
        return Err(AuthError::InvalidToken.into());
    }
    Ok(AdminToken(claims))
}
