//! Login, logout and session lookup

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// 当前登录的操作员
///
/// Extracted from the `session` cookie, or from `Authorization: Bearer` for
/// scripted callers. Handlers taking this reject anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(current_user(req))
    }
}

fn current_user(req: &HttpRequest) -> Result<CurrentUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(ApiError::MissingState)?;

    let token = req
        .cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| bearer_token(req))
        .ok_or(ApiError::Unauthorized)?;

    match state.sessions.verify(&token) {
        Ok(username) => Ok(CurrentUser(username)),
        Err(e) => {
            tracing::debug!("Rejected session: {e}");
            Err(ApiError::Unauthorized)
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

fn session_cookie(value: String, max_age: time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .finish()
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, ApiError> {
    let identity = match state
        .authenticator
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(username = %form.username, "Login failed: {e}");
            return Err(e.into());
        }
    };

    let session = state.sessions.issue(&identity.username)?;
    tracing::info!(
        username = %identity.username,
        display_name = %identity.display_name,
        "Operator logged in"
    );

    let max_age = time::Duration::seconds(state.sessions.ttl().num_seconds());
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(
            session.token.clone(),
            max_age,
            state.secure_cookie,
        ))
        .json(session))
}

/// POST /logout
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let mut cookie = session_cookie(String::new(), time::Duration::ZERO, state.secure_cookie);
    cookie.make_removal();
    HttpResponse::NoContent().cookie(cookie).finish()
}

/// GET /session
pub async fn session(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "username": user.0 }))
}
