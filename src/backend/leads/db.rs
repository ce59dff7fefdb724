//! Lead storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Contact details captured by a chatbox widget
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: Uuid,
    pub chatbox_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated values for a new lead
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

pub async fn create_lead(
    pool: &PgPool,
    chatbox_id: Uuid,
    lead: &NewLead,
) -> Result<Lead, sqlx::Error> {
    sqlx::query_as::<_, Lead>(
        r#"
        INSERT INTO leads (id, chatbox_id, name, email, phone, message, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, chatbox_id, name, email, phone, message, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(chatbox_id)
    .bind(&lead.name)
    .bind(&lead.email)
    .bind(&lead.phone)
    .bind(&lead.message)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Leads of one chatbox, newest first
pub async fn list_leads(pool: &PgPool, chatbox_id: Uuid) -> Result<Vec<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>(
        r#"
        SELECT id, chatbox_id, name, email, phone, message, created_at
        FROM leads
        WHERE chatbox_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(chatbox_id)
    .fetch_all(pool)
    .await
}
