//! Backend Module
//!
//! All server-side code: the Axum HTTP server, the dynamic CORS allowlist,
//! owner accounts and the tenant (chatbox) records it is derived from.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly and global layers
//! - **`origins`** - Origin resolver: static list, tenant domains, cache
//! - **`middleware`** - CORS enforcement and bearer-token authentication
//! - **`auth`** - Users, JWT sessions, signup/login handlers
//! - **`usage`** - Token usage against plan limits
//! - **`chatbox`** - Tenant CRUD; mutations refresh the origin cache
//! - **`leads`** - Lead capture from embedded widgets
//! - **`widget`** - The embeddable loader script
//! - **`error`** - Backend error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - Binary entry point
//! ├── server/
//! ├── routes/
//! ├── origins/
//! ├── middleware/
//! ├── auth/
//! ├── usage/
//! ├── chatbox/
//! ├── leads/
//! ├── widget/
//! └── error/
//! ```
//!
//! # Request Flow
//!
//! Every request passes the CORS middleware first. Requests with a
//! disallowed `Origin` are answered with 403 before routing; allowed
//! preflights get an empty 200. Owner routes then pass `auth_middleware`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Dynamic CORS origin allowlist
pub mod origins;

/// Middleware for request processing
pub mod middleware;

/// Authentication and user management
pub mod auth;

/// Token usage tracking
pub mod usage;

/// Tenant chatbox records
pub mod chatbox;

/// Lead capture
pub mod leads;

/// Embeddable widget script
pub mod widget;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use origins::OriginResolver;
pub use server::create_app;
