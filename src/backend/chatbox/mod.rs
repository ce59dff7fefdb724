//! Chatbox Module
//!
//! Tenant records. A chatbox's `domain_url` is what the dynamic half of the
//! CORS allowlist is built from.
//!
//! # Module Structure
//!
//! ```text
//! chatbox/
//! ├── mod.rs        - Module exports
//! ├── models.rs     - Row type, request types, validation
//! ├── db.rs         - Database operations
//! └── handlers.rs   - Owner CRUD handlers
//! ```

pub mod db;
pub mod handlers;
pub mod models;

pub use models::{Chatbox, ChatboxChanges, NewChatbox};
