use axum::{
    Form, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::session::{CurrentUser, clear_session_cookie, session_cookie};
use crate::domain::DomainError;
use crate::infrastructure::AppState;

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[utoipa::path(
    post,
    path = "/register",
    responses(
        (status = 201, description = "Account created and session cookie set"),
        (status = 400, description = "Invalid username, email or password"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, DomainError> {
    let user = state
        .credentials
        .register(form.username.trim(), form.email.trim(), &form.password)
        .await?;
    let token = state.sessions.create_session(user.id).await?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&token, state.secure_cookies))],
        Json(user),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    responses(
        (status = 200, description = "Authenticated and session cookie set"),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, DomainError> {
    tracing::info!("Login attempt for user: {}", form.username);

    let user = state
        .credentials
        .login(form.username.trim(), &form.password)
        .await?;
    let token = state.sessions.create_session(user.id).await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token, state.secure_cookies))],
        Json(user),
    ))
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session destroyed"),
        (status = 401, description = "Not signed in")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, DomainError> {
    state.sessions.destroy_session(&current.token).await?;
    tracing::info!("User {} logged out", current.user.username);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie(state.secure_cookies))],
        Json(json!({ "message": "Logged out" })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "The signed-in user"),
        (status = 401, description = "Not signed in")
    ),
    tag = "auth"
)]
pub async fn me(current: CurrentUser) -> impl IntoResponse {
    Json(current.user)
}
