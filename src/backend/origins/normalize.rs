//! Origin string normalization.
//!
//! Matching here is host-only by construction: ports, paths and query strings
//! are not parsed, they simply take part in the string comparison. The rules:
//!
//! - surrounding whitespace is ignored and comparison is ASCII case-insensitive
//! - one trailing `/` is dropped
//! - a leading `http://` or `https://` is dropped, so the two schemes compare equal
//! - `www.example.com` and `example.com` are the same site, in either direction

use std::collections::HashSet;

const HTTP: &str = "http://";
const HTTPS: &str = "https://";

/// True if `entry` begins with an HTTP(S) scheme.
///
/// The `null` sentinel and anything malformed fail this check and never take
/// part in dynamic matching.
pub fn is_url_like(entry: &str) -> bool {
    let lower = entry.trim_start().to_ascii_lowercase();
    lower.starts_with(HTTP) || lower.starts_with(HTTPS)
}

/// Reduce an origin or allowlist entry to its comparison key.
pub fn host_key(origin: &str) -> String {
    let lower = origin.trim().to_ascii_lowercase();
    let without_slash = lower.strip_suffix('/').unwrap_or(&lower);
    without_slash
        .strip_prefix(HTTPS)
        .or_else(|| without_slash.strip_prefix(HTTP))
        .unwrap_or(without_slash)
        .to_string()
}

/// Compare two already-normalized keys, treating a `www.` prefix on either
/// side as insignificant.
pub fn keys_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (a.strip_prefix("www."), b.strip_prefix("www.")) {
        (Some(rest), _) if rest == b => true,
        (_, Some(rest)) if rest == a => true,
        _ => false,
    }
}

/// Does the request `origin` match the allowlist `entry`?
pub fn origin_matches_entry(origin: &str, entry: &str) -> bool {
    is_url_like(entry) && keys_match(&host_key(origin), &host_key(entry))
}

/// Turn a tenant's stored `domain_url` into an allowlist entry.
///
/// Returns `None` for values that are empty after trimming. A value without a
/// scheme is assumed to be served over HTTPS.
pub fn to_allowlist_entry(domain_url: &str) -> Option<String> {
    let trimmed = domain_url.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_url_like(trimmed) {
        Some(trimmed.to_string())
    } else {
        Some(format!("{HTTPS}{trimmed}"))
    }
}

/// Remove duplicates, keeping the first occurrence of each value.
pub fn dedupe<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
