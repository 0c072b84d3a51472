//! Lease lifecycle counters.

/// A take (owner-bound or standalone) succeeded.
pub fn record_taken() {
    metrics::counter!("lease_taken", 1);
}

/// A take failed on a remote fault.
pub fn record_take_failed() {
    metrics::counter!("lease_take_failed", 1);
}

/// A revoke reached the authority.
pub fn record_released() {
    metrics::counter!("lease_released", 1);
}

/// A revoke faulted and was dropped.
pub fn record_release_failed() {
    metrics::counter!("lease_release_failed", 1);
}

/// An armed lease was dropped without release.
pub fn record_leaked() {
    metrics::counter!("lease_leaked", 1);
}
