use crate::config::LeaseConfig;
use crate::guard::{GuardState, LeakGuard, LeakReporter};
use crate::metrics;
use dropgrant_core::{DropGrant, OwnerScopes, OwnerToken, RemoteCallFault};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

const CLOSE_METHOD: &str = "release";

static NEXT_LEASE_ID: AtomicU64 = AtomicU64::new(1);

/// Permissions for the content URIs of one drop.
///
/// Inert until taken. Once taken, the permissions stay granted until
/// [`release`](Self::release) is called, the lease is dropped, or (for
/// owner-bound leases) the owner is destroyed on the authority side,
/// whichever comes first.
pub struct PermissionLease {
    id: u64,
    grant: Arc<dyn DropGrant>,
    scopes: Arc<dyn OwnerScopes>,
    reporter: Arc<dyn LeakReporter>,
    config: Arc<LeaseConfig>,
    owner_token: Option<OwnerToken>,
    guard: LeakGuard,
}

impl PermissionLease {
    pub(crate) fn new(
        grant: Arc<dyn DropGrant>,
        scopes: Arc<dyn OwnerScopes>,
        reporter: Arc<dyn LeakReporter>,
        config: Arc<LeaseConfig>,
    ) -> Self {
        let id = NEXT_LEASE_ID.fetch_add(1, Ordering::Relaxed);
        let guard = LeakGuard::new(config.leak_detection);
        Self {
            id,
            grant,
            scopes,
            reporter,
            config,
            owner_token: None,
            guard,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    /// Whether a revoke is outstanding.
    pub fn is_taken(&self) -> bool {
        self.guard.is_armed()
    }

    /// Transient scope allocated by [`take_standalone`](Self::take_standalone).
    pub fn owner_token(&self) -> Option<&OwnerToken> {
        self.owner_token.as_ref()
    }

    /// Take the permissions and bind their lifetime to `owner`.
    ///
    /// Returns false if the authority could not be reached or refused; the
    /// lease is left as it was.
    #[track_caller]
    pub fn bind_to_owner(&mut self, owner: &OwnerToken) -> bool {
        match self.try_bind_to_owner(owner) {
            Ok(()) => true,
            Err(fault) => {
                warn!(lease_id = self.id, owner = %owner, "Failed to take drop permissions: {}", fault);
                false
            }
        }
    }

    /// [`bind_to_owner`](Self::bind_to_owner), surfacing the fault.
    #[track_caller]
    pub fn try_bind_to_owner(&mut self, owner: &OwnerToken) -> Result<(), RemoteCallFault> {
        if let Err(fault) = self.grant.take(owner) {
            metrics::record_take_failed();
            return Err(fault);
        }

        // Revocation is now attributed to `owner`; the earlier scope is ours
        // alone and nothing else will destroy it.
        if let Some(previous) = self.owner_token.take() {
            self.discard_scope(&previous);
        }
        self.guard.open(CLOSE_METHOD);
        metrics::record_taken();
        debug!(lease_id = self.id, owner = %owner, "Took drop permissions");
        Ok(())
    }

    /// Take the permissions under a fresh transient scope. The caller must
    /// [`release`](Self::release) explicitly.
    #[track_caller]
    pub fn take_standalone(&mut self) -> bool {
        match self.try_take_standalone() {
            Ok(()) => true,
            Err(fault) => {
                warn!(lease_id = self.id, "Failed to take transient drop permissions: {}", fault);
                false
            }
        }
    }

    /// [`take_standalone`](Self::take_standalone), surfacing the fault.
    #[track_caller]
    pub fn try_take_standalone(&mut self) -> Result<(), RemoteCallFault> {
        let token = match self.scopes.new_owner_scope(&self.config.owner_scope_tag) {
            Ok(token) => token,
            Err(fault) => {
                metrics::record_take_failed();
                return Err(fault);
            }
        };

        if let Err(fault) = self.grant.take_transient(&token) {
            metrics::record_take_failed();
            if self.config.discard_scope_on_failure {
                self.discard_scope(&token);
            } else {
                debug!(lease_id = self.id, owner = %token, "Leaving unused scope to the authority");
            }
            return Err(fault);
        }

        debug!(lease_id = self.id, owner = %token, "Took transient drop permissions");
        if let Some(previous) = self.owner_token.replace(token) {
            self.discard_scope(&previous);
        }
        self.guard.open(CLOSE_METHOD);
        metrics::record_taken();
        Ok(())
    }

    fn discard_scope(&self, token: &OwnerToken) {
        if let Err(fault) = self.scopes.discard_owner_scope(token) {
            warn!(lease_id = self.id, owner = %token, "Failed to discard unused scope: {}", fault);
        }
    }

    /// Revoke the permissions.
    ///
    /// Best effort: a fault reaching the authority is logged and dropped.
    /// The lease is disarmed either way, and calling this again, or on a
    /// lease that was never taken, does not reach the authority.
    pub fn release(&mut self) {
        if self.guard.is_armed() {
            match self.grant.release() {
                Ok(()) => {
                    metrics::record_released();
                    info!(lease_id = self.id, "Released drop permissions");
                }
                Err(fault) => {
                    metrics::record_release_failed();
                    warn!(lease_id = self.id, "Failed to release drop permissions: {}", fault);
                }
            }
        }
        self.owner_token = None;
        self.guard.close();
    }
}

impl Drop for PermissionLease {
    fn drop(&mut self) {
        if self.guard.warn_if_open(self.id, self.reporter.as_ref()) {
            metrics::record_leaked();
        }
        self.release();
    }
}

impl std::fmt::Debug for PermissionLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionLease")
            .field("id", &self.id)
            .field("state", &self.guard.state())
            .field("owner_token", &self.owner_token)
            .finish()
    }
}
