//! Tenant-level enums stored as text columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SharedError;

/// Whether a chatbox is serving traffic.
///
/// Only `Active` chatboxes contribute their domain to the CORS allowlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatboxStatus {
    #[default]
    Active,
    Inactive,
}

impl ChatboxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatboxStatus::Active => "active",
            ChatboxStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for ChatboxStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ChatboxStatus::Active),
            "inactive" => Ok(ChatboxStatus::Inactive),
            other => Err(SharedError::unknown_variant("chatbox status", other)),
        }
    }
}

impl fmt::Display for ChatboxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription plan, which fixes the monthly token quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Starter,
    Pro,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Starter => "starter",
            Plan::Pro => "pro",
        }
    }

    /// Token quota granted by this plan
    pub fn token_limit(&self) -> i64 {
        match self {
            Plan::Free => 10_000,
            Plan::Starter => 100_000,
            Plan::Pro => 1_000_000,
        }
    }
}

impl FromStr for Plan {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Plan::Free),
            "starter" => Ok(Plan::Starter),
            "pro" => Ok(Plan::Pro),
            other => Err(SharedError::unknown_variant("plan", other)),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
