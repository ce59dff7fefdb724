//! Origin Allowlist Module
//!
//! Decides which browser origins may make credentialed cross-origin requests
//! to the API.
//!
//! # Module Structure
//!
//! ```text
//! origins/
//! ├── mod.rs        - Module exports
//! ├── allowlist.rs  - Static origins and primary-domain rules
//! ├── normalize.rs  - Pure origin string normalization
//! ├── clock.rs      - Injectable time source
//! ├── store.rs      - Tenant domain read contract + Postgres implementation
//! ├── resolver.rs   - Cached two-tier origin check
//! └── handlers.rs   - Admin endpoints (refresh, debug listing)
//! ```
//!
//! The enforcement side lives in `backend::middleware::cors`.

pub mod allowlist;
pub mod clock;
pub mod handlers;
pub mod normalize;
pub mod resolver;
pub mod store;

pub use allowlist::StaticOrigins;
pub use clock::{Clock, ManualClock, SystemClock};
pub use resolver::{OriginResolver, DEFAULT_CACHE_TTL};
pub use store::{ChatboxDomainStore, StoreError, TenantDomainRecord, TenantDomainSource};
