use crate::config::LeaseConfig;
use crate::guard::{LeakReporter, TracingLeakReporter};
use crate::lease::PermissionLease;
use dropgrant_core::{DragEvent, OwnerScopes, OwnerToken};
use std::sync::Arc;
use tracing::debug;

/// Hands out leases for drop events.
///
/// Holds the collaborators every lease shares: the scope allocator on the
/// authority, where leak reports go, and the lease configuration.
#[derive(Clone)]
pub struct LeaseProvider {
    scopes: Arc<dyn OwnerScopes>,
    reporter: Arc<dyn LeakReporter>,
    config: Arc<LeaseConfig>,
}

impl LeaseProvider {
    pub fn new(scopes: Arc<dyn OwnerScopes>, config: LeaseConfig) -> Self {
        Self {
            scopes,
            reporter: Arc::new(TracingLeakReporter),
            config: Arc::new(config),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn LeakReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &LeaseConfig {
        &self.config
    }

    /// Wrap the event's grant in a lease, or `None` if the drop carries no
    /// content URI permissions. Does not contact the authority.
    pub fn obtain(&self, event: &DragEvent) -> Option<PermissionLease> {
        let grant = event.drop_grant()?;
        let lease = PermissionLease::new(
            Arc::clone(grant),
            Arc::clone(&self.scopes),
            Arc::clone(&self.reporter),
            Arc::clone(&self.config),
        );
        debug!(lease_id = lease.id(), "Obtained drop permission lease");
        Some(lease)
    }

    /// Obtain a lease and bind it to `owner` in one step.
    ///
    /// `None` if the event carries no grant or the authority refused the take.
    #[track_caller]
    pub fn request_for_owner(
        &self,
        event: &DragEvent,
        owner: &OwnerToken,
    ) -> Option<PermissionLease> {
        let mut lease = self.obtain(event)?;
        if !lease.bind_to_owner(owner) {
            return None;
        }
        Some(lease)
    }
}

impl std::fmt::Debug for LeaseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaseProvider")
            .field("config", &self.config)
            .finish()
    }
}
