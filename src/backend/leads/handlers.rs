/**
 * Lead Handlers
 *
 * - `POST /api/chatboxes/{id}/leads` - public, called by the embedded widget
 * - `GET /api/chatboxes/{id}/leads` - owner only
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::chatbox::db::{get_chatbox, get_chatbox_for_owner};
use crate::backend::error::BackendError;
use crate::backend::leads::db::{self, Lead, NewLead};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SubmitLeadRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim every field and require a way to contact the lead
pub fn validate_lead(request: SubmitLeadRequest) -> Result<NewLead, BackendError> {
    let lead = NewLead {
        name: non_blank(request.name),
        email: non_blank(request.email),
        phone: non_blank(request.phone),
        message: non_blank(request.message),
    };

    if lead.email.is_none() && lead.phone.is_none() {
        return Err(BackendError::bad_request("Either email or phone is required"));
    }
    if lead.email.as_deref().is_some_and(|e| !e.contains('@')) {
        return Err(BackendError::bad_request("Invalid email format"));
    }

    Ok(lead)
}

/// Store a lead for an active chatbox
pub async fn submit_lead(
    State(state): State<AppState>,
    Path(chatbox_id): Path<Uuid>,
    Json(request): Json<SubmitLeadRequest>,
) -> Result<(StatusCode, Json<Lead>), BackendError> {
    let pool = state.pool()?;
    let new = validate_lead(request)?;

    let chatbox = get_chatbox(pool, chatbox_id)
        .await?
        .filter(|c| c.is_active())
        .ok_or_else(|| BackendError::not_found("Chatbox"))?;

    let lead = db::create_lead(pool, chatbox.id, &new).await?;
    tracing::info!("Lead {} captured for chatbox {}", lead.id, chatbox.id);

    Ok((StatusCode::CREATED, Json(lead)))
}

/// List leads of a chatbox the caller owns
pub async fn list_leads(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(chatbox_id): Path<Uuid>,
) -> Result<Json<Vec<Lead>>, BackendError> {
    let pool = state.pool()?;

    get_chatbox_for_owner(pool, chatbox_id, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Chatbox"))?;

    Ok(Json(db::list_leads(pool, chatbox_id).await?))
}
