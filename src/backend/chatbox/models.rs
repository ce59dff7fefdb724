//! Chatbox records and request validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{ChatboxStatus, SharedError};

/// A tenant chatbox as stored in the `chatboxes` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chatbox {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    /// Site the widget is embedded on; feeds the CORS allowlist while active
    pub domain_url: Option<String>,
    pub status: String,
    pub welcome_message: Option<String>,
    pub theme_color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chatbox {
    pub fn status(&self) -> Result<ChatboxStatus, SharedError> {
        self.status.parse()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status(), Ok(ChatboxStatus::Active))
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateChatboxRequest {
    pub name: String,
    #[serde(default)]
    pub domain_url: Option<String>,
    #[serde(default)]
    pub status: Option<ChatboxStatus>,
    #[serde(default)]
    pub welcome_message: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
}

/// Partial update. Absent fields are left unchanged; `domain_url: ""` clears
/// the domain.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateChatboxRequest {
    pub name: Option<String>,
    pub domain_url: Option<String>,
    pub status: Option<ChatboxStatus>,
    pub welcome_message: Option<String>,
    pub theme_color: Option<String>,
}

/// Validated values for a new chatbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatbox {
    pub name: String,
    pub domain_url: Option<String>,
    pub status: ChatboxStatus,
    pub welcome_message: Option<String>,
    pub theme_color: Option<String>,
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatboxChanges {
    pub name: Option<String>,
    /// `Some(None)` clears the stored domain
    pub domain_url: Option<Option<String>>,
    pub status: Option<ChatboxStatus>,
    pub welcome_message: Option<String>,
    pub theme_color: Option<String>,
}

impl ChatboxChanges {
    /// Whether applying these changes can alter the CORS allowlist
    pub fn affects_origins(&self) -> bool {
        self.domain_url.is_some() || self.status.is_some()
    }
}

/// Trim a submitted domain. Blank clears it; inner whitespace is rejected.
pub fn normalize_domain_input(raw: &str) -> Result<Option<String>, BackendError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(SharedError::validation("domain_url", "must not contain whitespace").into());
    }
    Ok(Some(trimmed.to_string()))
}

fn validate_name(raw: &str) -> Result<String, BackendError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SharedError::validation("name", "must not be empty").into());
    }
    Ok(name.to_string())
}

impl TryFrom<CreateChatboxRequest> for NewChatbox {
    type Error = BackendError;

    fn try_from(request: CreateChatboxRequest) -> Result<Self, Self::Error> {
        let domain_url = match request.domain_url.as_deref() {
            Some(raw) => normalize_domain_input(raw)?,
            None => None,
        };

        Ok(Self {
            name: validate_name(&request.name)?,
            domain_url,
            status: request.status.unwrap_or_default(),
            welcome_message: request.welcome_message,
            theme_color: request.theme_color,
        })
    }
}

impl TryFrom<UpdateChatboxRequest> for ChatboxChanges {
    type Error = BackendError;

    fn try_from(request: UpdateChatboxRequest) -> Result<Self, Self::Error> {
        let name = request.name.as_deref().map(validate_name).transpose()?;
        let domain_url = request
            .domain_url
            .as_deref()
            .map(normalize_domain_input)
            .transpose()?;

        Ok(Self {
            name,
            domain_url,
            status: request.status,
            welcome_message: request.welcome_message,
            theme_color: request.theme_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_domain_input_trimmed() {
        assert_eq!(
            normalize_domain_input("  shop.example.com  ").unwrap(),
            Some("shop.example.com".to_string())
        );
    }

    #[test]
    fn test_domain_input_blank_clears() {
        assert_eq!(normalize_domain_input("   ").unwrap(), None);
        assert_eq!(normalize_domain_input("").unwrap(), None);
    }

    #[test]
    fn test_domain_input_inner_whitespace_rejected() {
        let err = normalize_domain_input("shop. example.com").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_create_request_defaults_to_active() {
        let new: NewChatbox = CreateChatboxRequest {
            name: " Support ".to_string(),
            domain_url: Some("https://shop.example.com".to_string()),
            status: None,
            welcome_message: None,
            theme_color: None,
        }
        .try_into()
        .unwrap();

        assert_eq!(new.name, "Support");
        assert_eq!(new.status, ChatboxStatus::Active);
        assert_eq!(new.domain_url.as_deref(), Some("https://shop.example.com"));
    }

    #[test]
    fn test_create_request_empty_name_rejected() {
        let result: Result<NewChatbox, _> = CreateChatboxRequest {
            name: "   ".to_string(),
            domain_url: None,
            status: None,
            welcome_message: None,
            theme_color: None,
        }
        .try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_update_empty_domain_clears() {
        let changes: ChatboxChanges = UpdateChatboxRequest {
            domain_url: Some(String::new()),
            ..Default::default()
        }
        .try_into()
        .unwrap();

        assert_eq!(changes.domain_url, Some(None));
        assert!(changes.affects_origins());
    }

    #[test]
    fn test_update_name_only_leaves_origins_alone() {
        let changes: ChatboxChanges = UpdateChatboxRequest {
            name: Some("Renamed".to_string()),
            ..Default::default()
        }
        .try_into()
        .unwrap();

        assert!(!changes.affects_origins());
    }

    #[test]
    fn test_update_status_deserializes() {
        let request: UpdateChatboxRequest =
            serde_json::from_str(r#"{"status":"inactive"}"#).unwrap();
        assert_eq!(request.status, Some(ChatboxStatus::Inactive));
    }
}
