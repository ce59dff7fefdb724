//! Chatbox HTTP Handlers
//!
//! Owner CRUD for chatboxes. Any change that can add or remove an allowed
//! origin schedules a background refresh of the origin resolver.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::backend::chatbox::db;
use crate::backend::chatbox::models::{
    Chatbox, ChatboxChanges, CreateChatboxRequest, NewChatbox, UpdateChatboxRequest,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Repopulate the origin cache without holding up the response
pub fn schedule_origin_refresh(state: &AppState, reason: &'static str) {
    let origins = state.origins.clone();
    tokio::spawn(async move {
        let entries = origins.refresh().await;
        tracing::info!("CORS origins refreshed after {} ({} origins)", reason, entries.len());
    });
}

/// Create a chatbox
pub async fn create_chatbox(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateChatboxRequest>,
) -> Result<(StatusCode, Json<Chatbox>), BackendError> {
    let pool = state.pool()?;
    let new = NewChatbox::try_from(request)?;

    let chatbox = db::create_chatbox(pool, auth.user_id, &new).await?;
    tracing::info!("Chatbox {} created by {}", chatbox.id, auth.user_id);

    if chatbox.domain_url.is_some() {
        schedule_origin_refresh(&state, "chatbox create");
    }

    Ok((StatusCode::CREATED, Json(chatbox)))
}

/// List the caller's chatboxes
pub async fn list_chatboxes(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Chatbox>>, BackendError> {
    let pool = state.pool()?;
    Ok(Json(db::list_chatboxes_for_owner(pool, auth.user_id).await?))
}

pub async fn get_chatbox(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Chatbox>, BackendError> {
    let pool = state.pool()?;
    db::get_chatbox_for_owner(pool, id, auth.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("Chatbox"))
}

/// Partially update a chatbox
pub async fn update_chatbox(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateChatboxRequest>,
) -> Result<Json<Chatbox>, BackendError> {
    let pool = state.pool()?;
    let changes = ChatboxChanges::try_from(request)?;

    let chatbox = db::update_chatbox(pool, id, auth.user_id, &changes)
        .await?
        .ok_or_else(|| BackendError::not_found("Chatbox"))?;

    if changes.affects_origins() {
        schedule_origin_refresh(&state, "chatbox update");
    }

    Ok(Json(chatbox))
}

pub async fn delete_chatbox(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let pool = state.pool()?;

    if !db::delete_chatbox(pool, id, auth.user_id).await? {
        return Err(BackendError::not_found("Chatbox"));
    }

    tracing::info!("Chatbox {} deleted by {}", id, auth.user_id);
    schedule_origin_refresh(&state, "chatbox delete");

    Ok(StatusCode::NO_CONTENT)
}
