//! Property-based tests for origin matching
//!
//! Uses proptest to generate host names and verify the matching rules hold
//! for all of them.

use proptest::prelude::*;

use chatbox_saas::backend::origins::normalize::{
    host_key, origin_matches_entry, to_allowlist_entry,
};
use chatbox_saas::backend::origins::StaticOrigins;

fn host() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}(\\.[a-z][a-z0-9-]{0,10}){1,3}"
        .prop_filter("no www prefix", |h| !h.starts_with("www."))
}

proptest! {
    #[test]
    fn test_bare_domain_matches_both_schemes(host in host()) {
        let entry = to_allowlist_entry(&host).unwrap();
        let secure = format!("https://{}", host);
        let plain = format!("http://{}", host);
        prop_assert!(origin_matches_entry(&secure, &entry), "{} vs {}", secure, entry);
        prop_assert!(origin_matches_entry(&plain, &entry), "{} vs {}", plain, entry);
    }

    #[test]
    fn test_www_is_symmetric(host in host()) {
        let bare = format!("https://{}", host);
        let www = format!("https://www.{}", host);
        prop_assert!(origin_matches_entry(&www, &bare), "{} vs {}", www, bare);
        prop_assert!(origin_matches_entry(&bare, &www), "{} vs {}", bare, www);
    }

    #[test]
    fn test_trailing_slash_and_case_ignored(host in host()) {
        let entry = format!("https://{}/", host);
        let origin = format!("HTTPS://{}", host.to_uppercase());
        prop_assert!(origin_matches_entry(&origin, &entry), "{} vs {}", origin, entry);
    }

    #[test]
    fn test_different_hosts_do_not_match(a in host(), b in host()) {
        prop_assume!(a != b);
        let entry = to_allowlist_entry(&a).unwrap();
        let other = format!("https://{}", b);
        prop_assert!(!origin_matches_entry(&other, &entry), "{} vs {}", other, entry);
    }

    #[test]
    fn test_allowlist_entry_is_stable(host in host()) {
        let once = to_allowlist_entry(&host).unwrap();
        let twice = to_allowlist_entry(&once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(host_key(&once), host);
    }

    #[test]
    fn test_primary_subdomains_always_allowed(label in "[a-z][a-z0-9-]{0,20}") {
        let statics = StaticOrigins::default();
        let subdomain = format!("https://{}.algoqube.com", label);
        prop_assert!(statics.allows(&subdomain), "{}", subdomain);
    }
}
