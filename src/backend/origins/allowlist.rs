//! The static half of the origin allowlist.

use crate::backend::origins::normalize::dedupe;
use crate::backend::server::config::CorsSettings;

/// Browsers send `Origin: null` for pages opened from `file://`.
pub const LOCAL_FILE_ORIGIN: &str = "null";

/// Operational origins trusted in every deployment.
pub const DEFAULT_STATIC_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5500",
    "https://algoqube.com",
    "https://www.algoqube.com",
    "https://chatbox.algoqube.com",
    "https://algoqube-chatbox.vercel.app",
    "https://algoqube-chatbox-git-staging.vercel.app",
];

pub const DEFAULT_PRIMARY_DOMAIN: &str = "algoqube.com";

/// Hard-coded origins plus the primary-domain rules.
#[derive(Debug, Clone)]
pub struct StaticOrigins {
    origins: Vec<String>,
    subdomain_suffix: Option<String>,
    bare_domain: Vec<String>,
}

impl StaticOrigins {
    /// Build the list: literal origins, then the optional frontend URL, then
    /// the `null` sentinel.
    pub fn new(
        primary_domain: &str,
        literal: impl IntoIterator<Item = String>,
        frontend_url: Option<&str>,
    ) -> Self {
        let frontend = frontend_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string());

        let origins = dedupe(
            literal
                .into_iter()
                .chain(frontend)
                .chain(std::iter::once(LOCAL_FILE_ORIGIN.to_string())),
        );

        let primary = primary_domain.trim().trim_start_matches('.').to_ascii_lowercase();
        let (subdomain_suffix, bare_domain) = if primary.is_empty() {
            (None, Vec::new())
        } else {
            (
                Some(format!(".{primary}")),
                vec![format!("https://{primary}"), format!("http://{primary}")],
            )
        };

        Self {
            origins,
            subdomain_suffix,
            bare_domain,
        }
    }

    pub fn from_settings(settings: &CorsSettings) -> Self {
        Self::new(
            &settings.primary_domain,
            settings.static_origins.iter().cloned(),
            settings.frontend_url.as_deref(),
        )
    }

    /// The literal list, including the sentinel
    pub fn list(&self) -> &[String] {
        &self.origins
    }

    /// Fast path of the origin check: exact literal match, a subdomain of the
    /// primary domain, or the primary domain itself.
    pub fn allows(&self, origin: &str) -> bool {
        if self.origins.iter().any(|allowed| allowed == origin) {
            return true;
        }
        if self.bare_domain.iter().any(|bare| bare == origin) {
            return true;
        }
        self.subdomain_suffix
            .as_deref()
            .is_some_and(|suffix| origin.ends_with(suffix))
    }
}

impl Default for StaticOrigins {
    fn default() -> Self {
        Self::new(
            DEFAULT_PRIMARY_DOMAIN,
            DEFAULT_STATIC_ORIGINS.iter().map(|o| o.to_string()),
            None,
        )
    }
}
