//! Blog endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::content::{BlogUpdate, BlogView, NewBlog};
use crate::helpers::BlogStats;
use crate::store::StoreError;

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<BlogView>> {
    Json(state.store.blog_views().await)
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BlogView>, ApiError> {
    Ok(Json(state.store.blog(&id).await?))
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<BlogStats> {
    let blogs = state.store.blogs().await;
    Json(BlogStats::collect(&blogs))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<NewBlog>, JsonRejection>,
) -> Result<(StatusCode, Json<BlogView>), ApiError> {
    let caller = state.authenticate(&headers)?;
    let Json(body) = body?;
    let record = body.validate()?;
    let claims = caller.ok_or_else(ApiError::token_invalid)?;

    let blog = state
        .store
        .insert_blog(&claims.id, record)
        .await
        .map_err(|e| match e {
            // Token outlived its user
            StoreError::UserNotFound(_) => ApiError::token_invalid(),
            e => e.into(),
        })?;

    Ok((StatusCode::CREATED, Json(blog)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<BlogUpdate>, JsonRejection>,
) -> Result<Json<BlogView>, ApiError> {
    state.authenticate(&headers)?;
    let Json(body) = body?;
    Ok(Json(state.store.update_blog(&id, body).await?))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let claims = state
        .authenticate(&headers)?
        .ok_or_else(ApiError::token_invalid)?;

    let owner = state.store.blog_owner(&id).await?;
    if owner != claims.id {
        tracing::warn!("User {} tried to delete blog {} owned by {}", claims.id, id, owner);
        return Err(ApiError::token_invalid());
    }

    state.store.remove_blog(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
