/**
 * Widget Loader Script
 *
 * `GET /widget/{id}/embed.js` returns a small script that tenants paste onto
 * their site. It carries the chatbox configuration as JSON and mounts the
 * chat bubble; every call it makes back to the API is subject to the CORS
 * allowlist, which is why the tenant's `domain_url` matters.
 */

use axum::{
    extract::{Path, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::chatbox::{db::get_chatbox, Chatbox};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const DEFAULT_THEME_COLOR: &str = "#4f46e5";
const DEFAULT_WELCOME_MESSAGE: &str = "Hi! How can we help you today?";

/// Configuration embedded into the loader script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub chatbox_id: Uuid,
    pub api_base: String,
    pub name: String,
    pub welcome_message: String,
    pub theme_color: String,
}

impl WidgetConfig {
    pub fn from_chatbox(chatbox: &Chatbox, api_base: &str) -> Self {
        Self {
            chatbox_id: chatbox.id,
            api_base: api_base.trim_end_matches('/').to_string(),
            name: chatbox.name.clone(),
            welcome_message: chatbox
                .welcome_message
                .clone()
                .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string()),
            theme_color: chatbox
                .theme_color
                .clone()
                .unwrap_or_else(|| DEFAULT_THEME_COLOR.to_string()),
        }
    }
}

/// Render the loader script for one chatbox
pub fn render_embed_script(config: &WidgetConfig) -> Result<String, serde_json::Error> {
    // `</` is escaped so the payload stays inert if inlined in a <script> tag.
    let json = serde_json::to_string(config)?.replace("</", "<\\/");

    Ok(format!(
        r#"(function () {{
  if (window.__chatboxLoaded) return;
  window.__chatboxLoaded = true;
  var config = {json};
  var bubble = document.createElement("button");
  bubble.setAttribute("aria-label", config.name);
  bubble.style.cssText = "position:fixed;bottom:20px;right:20px;width:56px;height:56px;border-radius:50%;border:none;cursor:pointer;z-index:2147483647;background:" + config.themeColor;
  var panel = document.createElement("div");
  panel.style.cssText = "position:fixed;bottom:88px;right:20px;width:320px;max-height:480px;display:none;flex-direction:column;background:#fff;border-radius:12px;box-shadow:0 8px 24px rgba(0,0,0,.2);z-index:2147483647;font-family:sans-serif";
  var header = document.createElement("div");
  header.textContent = config.name;
  header.style.cssText = "padding:12px;color:#fff;border-radius:12px 12px 0 0;background:" + config.themeColor;
  var body = document.createElement("div");
  body.textContent = config.welcomeMessage;
  body.style.cssText = "padding:12px";
  var form = document.createElement("form");
  form.innerHTML = '<input name="name" placeholder="Name"><input name="email" type="email" placeholder="Email"><input name="phone" placeholder="Phone"><textarea name="message" placeholder="Message"></textarea><button type="submit">Send</button>';
  form.style.cssText = "display:flex;flex-direction:column;gap:6px;padding:12px";
  form.addEventListener("submit", function (event) {{
    event.preventDefault();
    var data = new FormData(form);
    fetch(config.apiBase + "/api/chatboxes/" + config.chatboxId + "/leads", {{
      method: "POST",
      headers: {{ "Content-Type": "application/json" }},
      body: JSON.stringify({{
        name: data.get("name"),
        email: data.get("email"),
        phone: data.get("phone"),
        message: data.get("message")
      }})
    }}).then(function (response) {{
      body.textContent = response.ok ? "Thanks! We'll be in touch." : "Something went wrong. Please try again.";
      if (response.ok) form.reset();
    }});
  }});
  panel.appendChild(header);
  panel.appendChild(body);
  panel.appendChild(form);
  bubble.addEventListener("click", function () {{
    panel.style.display = panel.style.display === "none" ? "flex" : "none";
  }});
  document.body.appendChild(panel);
  document.body.appendChild(bubble);
}})();
"#
    ))
}

/// Serve the loader script for an active chatbox
pub async fn embed_script(
    State(state): State<AppState>,
    Path(chatbox_id): Path<Uuid>,
) -> Result<impl IntoResponse, BackendError> {
    let pool = state.pool()?;

    let chatbox = get_chatbox(pool, chatbox_id)
        .await?
        .filter(|c| c.is_active())
        .ok_or_else(|| BackendError::not_found("Chatbox"))?;

    let config = WidgetConfig::from_chatbox(&chatbox, &state.config.public_api_url);
    let script = render_embed_script(&config)?;

    Ok((
        [
            (CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (CACHE_CONTROL, "public, max-age=300"),
        ],
        script,
    ))
}
