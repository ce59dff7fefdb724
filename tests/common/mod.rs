//! Common test utilities and helpers
//!
//! - An in-memory tenant domain source with a failure switch
//! - A `TestServer` wired exactly like production, minus the database

#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::{header::ORIGIN, HeaderName, HeaderValue};
use axum_test::TestServer;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chatbox_saas::backend::origins::{StoreError, TenantDomainRecord, TenantDomainSource};
use chatbox_saas::backend::routes::create_router;
use chatbox_saas::backend::server::{build_state, AppState, ServerConfig};
use chatbox_saas::shared::ChatboxStatus;

pub mod database;

/// How the fake store answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Healthy,
    Failing,
    Panicking,
}

/// Tenant domains held in memory
pub struct FakeDomainStore {
    records: Mutex<Vec<TenantDomainRecord>>,
    failing: AtomicBool,
    panicking: AtomicBool,
    calls: AtomicUsize,
}

impl FakeDomainStore {
    pub fn with_domains(domains: &[&str]) -> Self {
        Self {
            records: Mutex::new(active_records(domains)),
            failing: AtomicBool::new(false),
            panicking: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_domains(&self, domains: &[&str]) {
        self.set_records(active_records(domains));
    }

    pub fn set_records(&self, records: Vec<TenantDomainRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn set_mode(&self, mode: StoreMode) {
        self.failing.store(mode == StoreMode::Failing, Ordering::SeqCst);
        self.panicking.store(mode == StoreMode::Panicking, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenantDomainSource for FakeDomainStore {
    async fn tenant_domains(&self) -> Result<Vec<TenantDomainRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panicking.load(Ordering::SeqCst) {
            panic!("tenant store blew up");
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(self.records.lock().unwrap().clone())
    }
}

fn active_records(domains: &[&str]) -> Vec<TenantDomainRecord> {
    domains
        .iter()
        .map(|d| TenantDomainRecord::new(Some(d), ChatboxStatus::Active))
        .collect()
}

/// A running test app plus handles into it
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<FakeDomainStore>,
}

/// Build the full router around `store` with no database
pub fn spawn_app(store: FakeDomainStore) -> TestApp {
    let store = Arc::new(store);
    let state = build_state(ServerConfig::default(), None, store.clone());
    let server = TestServer::new(create_router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        store,
    }
}

/// `Origin` header pair for `add_header`
pub fn origin(value: &str) -> (HeaderName, HeaderValue) {
    (ORIGIN, HeaderValue::from_str(value).unwrap())
}
