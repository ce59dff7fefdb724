//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`cors`** - Dynamic CORS enforcement backed by the origin resolver
//! - **`auth`** - Authentication middleware for protecting owner routes

pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use cors::cors_middleware;
