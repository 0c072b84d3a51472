//! Leak detection for leases dropped while still taken.
//!
//! The guard never releases anything itself. It only remembers where it was
//! armed so a forgotten release can be traced back to its call site.

use chrono::{DateTime, Utc};
use std::fmt;
use std::panic::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Never taken.
    Unarmed,
    /// Taken, revoke outstanding.
    Armed,
    /// Taken and released.
    Disarmed,
}

/// Diagnostic emitted when an armed guard is checked at teardown.
#[derive(Debug, Clone)]
pub struct LeakReport {
    pub lease_id: u64,
    /// Method the owner should have called.
    pub close_method: &'static str,
    pub armed_at: &'static Location<'static>,
    pub armed_time: DateTime<Utc>,
}

impl fmt::Display for LeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lease {} was taken at {} ({}) but never released; call {}() when done",
            self.lease_id,
            self.armed_at,
            self.armed_time.to_rfc3339(),
            self.close_method
        )
    }
}

/// Sink for leak diagnostics. May be invoked on whichever thread drops the
/// lease.
pub trait LeakReporter: Send + Sync {
    fn report(&self, report: &LeakReport);
}

/// Default reporter: a `warn` event on the current subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLeakReporter;

impl LeakReporter for TracingLeakReporter {
    fn report(&self, report: &LeakReport) {
        tracing::warn!(
            lease_id = report.lease_id,
            armed_at = %report.armed_at,
            "{}",
            report
        );
    }
}

#[derive(Debug)]
struct ArmSite {
    close_method: &'static str,
    location: &'static Location<'static>,
    time: DateTime<Utc>,
}

#[derive(Debug)]
pub struct LeakGuard {
    state: GuardState,
    site: Option<ArmSite>,
    enabled: bool,
}

impl LeakGuard {
    /// A disabled guard still tracks state but never reports.
    pub fn new(enabled: bool) -> Self {
        Self {
            state: GuardState::Unarmed,
            site: None,
            enabled,
        }
    }

    /// Arm the guard, recording the caller as the acquisition site.
    ///
    /// Re-arming an armed guard moves the recorded site to the latest caller.
    #[track_caller]
    pub fn open(&mut self, close_method: &'static str) {
        self.state = GuardState::Armed;
        self.site = Some(ArmSite {
            close_method,
            location: Location::caller(),
            time: Utc::now(),
        });
    }

    /// Disarm. No effect unless armed.
    pub fn close(&mut self) {
        if self.state == GuardState::Armed {
            self.state = GuardState::Disarmed;
        }
        self.site = None;
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == GuardState::Armed
    }

    /// Report through `reporter` if still armed and detection is enabled.
    ///
    /// Returns whether the guard was armed, regardless of reporting.
    pub fn warn_if_open(&self, lease_id: u64, reporter: &dyn LeakReporter) -> bool {
        if !self.is_armed() {
            return false;
        }
        if let (true, Some(site)) = (self.enabled, &self.site) {
            reporter.report(&LeakReport {
                lease_id,
                close_method: site.close_method,
                armed_at: site.location,
                armed_time: site.time,
            });
        }
        true
    }
}
