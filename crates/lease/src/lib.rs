//! Client-side handle for drag-and-drop content URI permissions.
//!
//! A [`PermissionLease`] wraps the remote grant carried by a drop. Taking it
//! either ties revocation to an owner the authority already knows (an
//! activity) or to a transient scope the lease allocates itself. Releasing
//! revokes. Dropping an un-released lease reports a leak and revokes anyway.

pub mod config;
pub mod guard;
pub mod lease;
pub mod metrics;
pub mod provider;

pub use config::{load_lease_config, ConfigError, LeaseConfig};
pub use dropgrant_core::{DragEvent, DropGrant, OwnerScopes, OwnerToken, RemoteCallFault};
pub use guard::{GuardState, LeakGuard, LeakReport, LeakReporter, TracingLeakReporter};
pub use lease::PermissionLease;
pub use provider::LeaseProvider;
