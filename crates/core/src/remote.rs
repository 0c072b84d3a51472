//! Remote authority interfaces.
//!
//! Calls are synchronous and block the caller for the duration of the round
//! trip. Implementations wrap whatever transport reaches the authority.

use crate::error::RemoteCallFault;
use crate::token::OwnerToken;

/// Remote side of the permissions attached to one drag-and-drop operation.
pub trait DropGrant: Send + Sync {
    /// Take the permissions and tie their revocation to `owner`'s lifetime.
    fn take(&self, owner: &OwnerToken) -> Result<(), RemoteCallFault>;

    /// Take the permissions under a transient scope the caller allocated.
    fn take_transient(&self, owner: &OwnerToken) -> Result<(), RemoteCallFault>;

    /// Revoke the permissions. Must tolerate being called on an already
    /// revoked or never taken grant.
    fn release(&self) -> Result<(), RemoteCallFault>;
}

/// Allocation of ownership scopes on the authority.
pub trait OwnerScopes: Send + Sync {
    /// Create a new scope. `tag` is a diagnostic label only.
    fn new_owner_scope(&self, tag: &str) -> Result<OwnerToken, RemoteCallFault>;

    /// Destroy a scope, revoking anything registered under it.
    fn discard_owner_scope(&self, owner: &OwnerToken) -> Result<(), RemoteCallFault>;
}
