//! Authentication Module
//!
//! This module handles user registration, login and session tokens for
//! chatbox owners.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username, email and password → user created on the free plan → JWT returned
//! 2. **Login**: username (or email) and password → credentials verified → JWT returned
//! 3. **Get Me**: JWT verified by `auth_middleware` → user info returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens (HS256) expire after 30 days
//! - Invalid credentials return 401 without saying which part was wrong

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use handlers::{get_me, login, signup};
