//! User and login endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::auth;
use crate::content::{LoginRequest, NewUser, UserView};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: String,
}

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<UserView>> {
    Json(state.store.user_views().await)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let Json(body) = body?;
    body.validate()?;

    let iterations = state.password_iterations;
    let password = body.password;
    let password_hash =
        tokio::task::spawn_blocking(move || auth::hash_password(&password, iterations)).await??;

    let user = state
        .store
        .insert_user(&body.username, body.name.as_deref().unwrap_or_default(), password_hash)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = body?;
    let invalid = || ApiError::Unauthorized("invalid username or password".to_string());

    let user = state.store.user_by_username(&body.username).await;

    // Unknown usernames still pay for a hash so both failures take as long
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let iterations = state.password_iterations;
    let password = body.password;
    let matches = tokio::task::spawn_blocking(move || {
        auth::verify_login(&password, stored.as_deref(), iterations)
    })
    .await?;

    let user = match user {
        Some(user) if matches => user,
        _ => return Err(invalid()),
    };

    let token = auth::issue_token(&state.secret, &user, state.token_ttl)?;
    tracing::info!("User {} logged in", user.username);

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
