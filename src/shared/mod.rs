//! Shared Module
//!
//! Types that are independent of the HTTP layer: validation errors and the
//! tenant enums persisted as text columns.

/// Shared error types
pub mod error;

/// Chatbox status and subscription plan enums
pub mod tenant;

pub use error::SharedError;
pub use tenant::{ChatboxStatus, Plan};
