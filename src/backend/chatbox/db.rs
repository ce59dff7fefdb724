/**
 * Chatbox Database Operations
 *
 * Every owner-facing query filters on `owner_id`, so a chatbox belonging to
 * someone else is indistinguishable from one that does not exist.
 */

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::chatbox::models::{Chatbox, ChatboxChanges, NewChatbox};

const CHATBOX_COLUMNS: &str =
    "id, owner_id, name, domain_url, status, welcome_message, theme_color, created_at, updated_at";

/// Insert a chatbox for `owner_id`
pub async fn create_chatbox(
    pool: &PgPool,
    owner_id: Uuid,
    new: &NewChatbox,
) -> Result<Chatbox, sqlx::Error> {
    let now = Utc::now();
    let sql = format!(
        r#"
        INSERT INTO chatboxes (id, owner_id, name, domain_url, status, welcome_message, theme_color, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING {CHATBOX_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Chatbox>(&sql)
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&new.name)
        .bind(&new.domain_url)
        .bind(new.status.as_str())
        .bind(&new.welcome_message)
        .bind(&new.theme_color)
        .bind(now)
        .fetch_one(pool)
        .await
}

/// All chatboxes of one owner, newest first
pub async fn list_chatboxes_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<Chatbox>, sqlx::Error> {
    let sql = format!(
        "SELECT {CHATBOX_COLUMNS} FROM chatboxes WHERE owner_id = $1 ORDER BY created_at DESC"
    );
    sqlx::query_as::<_, Chatbox>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await
}

/// A chatbox if it exists and belongs to `owner_id`
pub async fn get_chatbox_for_owner(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Chatbox>, sqlx::Error> {
    let sql = format!("SELECT {CHATBOX_COLUMNS} FROM chatboxes WHERE id = $1 AND owner_id = $2");
    sqlx::query_as::<_, Chatbox>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

/// A chatbox regardless of owner, for the public widget and lead routes
pub async fn get_chatbox(pool: &PgPool, id: Uuid) -> Result<Option<Chatbox>, sqlx::Error> {
    let sql = format!("SELECT {CHATBOX_COLUMNS} FROM chatboxes WHERE id = $1");
    sqlx::query_as::<_, Chatbox>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Apply `changes`; returns `None` when no chatbox of this owner matched
pub async fn update_chatbox(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    changes: &ChatboxChanges,
) -> Result<Option<Chatbox>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE chatboxes
        SET name = COALESCE($3, name),
            domain_url = CASE WHEN $4 THEN $5 ELSE domain_url END,
            status = COALESCE($6, status),
            welcome_message = COALESCE($7, welcome_message),
            theme_color = COALESCE($8, theme_color),
            updated_at = $9
        WHERE id = $1 AND owner_id = $2
        RETURNING {CHATBOX_COLUMNS}
        "#
    );

    let domain_url = changes.domain_url.clone().flatten();

    sqlx::query_as::<_, Chatbox>(&sql)
        .bind(id)
        .bind(owner_id)
        .bind(&changes.name)
        .bind(changes.domain_url.is_some())
        .bind(domain_url)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(&changes.welcome_message)
        .bind(&changes.theme_color)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await
}

/// Delete a chatbox; `false` when no chatbox of this owner matched
pub async fn delete_chatbox(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chatboxes WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
