//! Chatbox SaaS - Main Library
//!
//! Backend for a multi-tenant chatbox product. Tenants embed a chat widget
//! on their own sites; the API decides per request which browser origins may
//! call it with credentials.
//!
//! # Module Structure
//!
//! - **`shared`** - Types independent of the HTTP layer
//!   - Chatbox status and plan enums
//!   - Validation error type
//!
//! - **`backend`** - The Axum server
//!   - Dynamic CORS origin resolver and middleware
//!   - Owner accounts, chatboxes, leads, token usage
//!   - Widget loader script
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatbox_saas::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # CORS Model
//!
//! An origin is allowed if it is a static operational origin, a subdomain of
//! the primary domain, or the declared domain of an active chatbox. Tenant
//! domains are cached for a short TTL and refreshed immediately whenever a
//! chatbox changes. Failures in the tenant lookup fall back to the static
//! list; failures in the resolver itself fall back to permissive,
//! non-credentialed headers.
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation of tenant values
//! - `backend::error::BackendError` for everything a handler can return
//! - `backend::server::ConfigError` for startup configuration

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
