//! Token usage tracking against plan limits.

pub mod api;

pub use api::{check_quota, get_usage_stats, record_token_usage, UsageStats};
