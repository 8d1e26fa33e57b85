use actix_web::{
    web,
    HttpResponse,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::auth::{
    AdminCredentials,
    AdminToken,
    AuthError,
    Claims,
    TokenService,
    ADMIN_ROLE,
};
use crate::routes::RouteError;

#[derive(Deserialize)]
pub struct LoginForm {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
struct AdminUser<'a> {
    email: &'a str,
    role: &'a str,
}

#[derive(Serialize)]
struct LoginResponse<'a> {
    success: bool,
    message: &'a str,
    token: String,
    user: AdminUser<'a>,
}

#[derive(Serialize)]
struct VerifyResponse<'a> {
    success: bool,
    user: &'a Claims,
}

#[tracing::instrument(name = "admin login", skip(form, admin, tokens))]
pub async fn login(
    form: web::Json<LoginForm>,
    admin: web::Data<AdminCredentials>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse, RouteError> {
    let LoginForm { email, password } = form.into_inner();
    if !admin.matches(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    ) {
        tracing::warn!("admin login with invalid credentials");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = tokens.issue(admin.email()).map_err(|e| {
        tracing::error!("{}", e);
        RouteError::Internal {
            message: "Login error".into(),
        }
    })?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful",
        token,
        user: AdminUser {
            email: admin.email(),
            role: ADMIN_ROLE,
        },
    }))
}

pub async fn verify(admin: AdminToken) -> HttpResponse {
    HttpResponse::Ok().json(VerifyResponse {
        success: true,
        user: admin.claims(),
    })
}
