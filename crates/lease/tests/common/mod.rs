#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Test doubles for the grant authority.

use dropgrant_lease::*;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

fn fault(flag: &AtomicBool, what: &str) -> Result<(), RemoteCallFault> {
    if flag.load(Ordering::SeqCst) {
        return Err(RemoteCallFault::Unreachable(format!("{} failed", what)));
    }
    Ok(())
}

/// Grant that counts calls and fails on demand.
#[derive(Default)]
pub struct MockGrant {
    pub fail_take: AtomicBool,
    pub fail_take_transient: AtomicBool,
    pub fail_release: AtomicBool,
    take_calls: AtomicUsize,
    take_transient_calls: AtomicUsize,
    release_calls: AtomicUsize,
    owners: Mutex<Vec<OwnerToken>>,
}

impl MockGrant {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take_calls(&self) -> usize {
        self.take_calls.load(Ordering::SeqCst)
    }

    pub fn take_transient_calls(&self) -> usize {
        self.take_transient_calls.load(Ordering::SeqCst)
    }

    pub fn release_calls(&self) -> usize {
        self.release_calls.load(Ordering::SeqCst)
    }

    /// Owners passed to successful takes, in order.
    pub fn owners(&self) -> Vec<OwnerToken> {
        self.owners.lock().clone()
    }

    pub fn set_fail_take(&self, fail: bool) {
        self.fail_take.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_take_transient(&self, fail: bool) {
        self.fail_take_transient.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_release(&self, fail: bool) {
        self.fail_release.store(fail, Ordering::SeqCst);
    }
}

impl DropGrant for MockGrant {
    fn take(&self, owner: &OwnerToken) -> Result<(), RemoteCallFault> {
        self.take_calls.fetch_add(1, Ordering::SeqCst);
        fault(&self.fail_take, "take")?;
        self.owners.lock().push(owner.clone());
        Ok(())
    }

    fn take_transient(&self, owner: &OwnerToken) -> Result<(), RemoteCallFault> {
        self.take_transient_calls.fetch_add(1, Ordering::SeqCst);
        fault(&self.fail_take_transient, "take_transient")?;
        self.owners.lock().push(owner.clone());
        Ok(())
    }

    fn release(&self) -> Result<(), RemoteCallFault> {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        fault(&self.fail_release, "release")
    }
}

/// Scope allocator handing out uuid tokens.
#[derive(Default)]
pub struct MockScopes {
    pub fail_allocate: AtomicBool,
    pub fail_discard: AtomicBool,
    allocated: Mutex<Vec<(String, OwnerToken)>>,
    discarded: Mutex<Vec<OwnerToken>>,
}

impl MockScopes {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// `(tag, token)` for every allocation.
    pub fn allocated(&self) -> Vec<(String, OwnerToken)> {
        self.allocated.lock().clone()
    }

    pub fn discarded(&self) -> Vec<OwnerToken> {
        self.discarded.lock().clone()
    }

    pub fn set_fail_allocate(&self, fail: bool) {
        self.fail_allocate.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_discard(&self, fail: bool) {
        self.fail_discard.store(fail, Ordering::SeqCst);
    }
}

impl OwnerScopes for MockScopes {
    fn new_owner_scope(&self, tag: &str) -> Result<OwnerToken, RemoteCallFault> {
        fault(&self.fail_allocate, "new_owner_scope")?;
        let token = OwnerToken::new(format!("{}:{}", tag, uuid::Uuid::new_v4()));
        self.allocated.lock().push((tag.to_string(), token.clone()));
        Ok(token)
    }

    fn discard_owner_scope(&self, owner: &OwnerToken) -> Result<(), RemoteCallFault> {
        fault(&self.fail_discard, "discard_owner_scope")?;
        self.discarded.lock().push(owner.clone());
        Ok(())
    }
}

/// Leak reporter that keeps every report.
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<LeakReport>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reports(&self) -> Vec<LeakReport> {
        self.reports.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.reports.lock().len()
    }
}

impl LeakReporter for RecordingReporter {
    fn report(&self, report: &LeakReport) {
        self.reports.lock().push(report.clone());
    }
}

pub struct Harness {
    pub grant: Arc<MockGrant>,
    pub scopes: Arc<MockScopes>,
    pub reporter: Arc<RecordingReporter>,
    pub provider: LeaseProvider,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(LeaseConfig::default())
    }

    pub fn with_config(config: LeaseConfig) -> Self {
        let grant = MockGrant::new();
        let scopes = MockScopes::new();
        let reporter = RecordingReporter::new();
        let provider =
            LeaseProvider::new(scopes.clone(), config).with_reporter(reporter.clone());
        Self {
            grant,
            scopes,
            reporter,
            provider,
        }
    }

    pub fn event(&self) -> DragEvent {
        DragEvent::with_grant(self.grant.clone())
    }

    pub fn lease(&self) -> PermissionLease {
        self.provider.obtain(&self.event()).unwrap()
    }
}
