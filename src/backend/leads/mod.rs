//! Leads captured by chatbox widgets.

pub mod db;
pub mod handlers;

pub use db::{Lead, NewLead};
