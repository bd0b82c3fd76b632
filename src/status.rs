//! Reachability status model
//!
//! Three tri-state results, overwritten in place every check cycle, plus the
//! deterministic mappings to display text, serial labels and LED behavior.
//! Kept free of hardware types so the test binary can drive it directly.

use crate::config;

/// Result of a single reachability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Check succeeded (association up / HTTP 200)
    Ok,
    /// Check failed (no association / non-200 / transport error)
    Fail,
    /// Check not performed, typically because WiFi is down
    NotApplicable,
}

impl ProbeStatus {
    /// Label used in the serial status line
    pub fn label(self) -> &'static str {
        match self {
            ProbeStatus::Ok => "OK",
            ProbeStatus::Fail => "FAIL",
            ProbeStatus::NotApplicable => "N/A",
        }
    }
}

/// LED behavior derived from a [`StatusReport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPattern {
    /// LED held on: initializing or WiFi down
    Solid,
    /// LED toggled every `interval_ms` milliseconds
    Blink { interval_ms: u64 },
}

/// The whole of the system state: one tri-state value per check target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub wifi: ProbeStatus,
    pub internet: ProbeStatus,
    pub server: ProbeStatus,
}

impl StatusReport {
    /// Boot-time report: WiFi unverified, nothing probed yet
    pub const fn new() -> Self {
        Self {
            wifi: ProbeStatus::Fail,
            internet: ProbeStatus::NotApplicable,
            server: ProbeStatus::NotApplicable,
        }
    }

    /// Mark WiFi down and invalidate both probe results, the state held
    /// for the whole of a reconnection phase
    pub fn wifi_lost(&mut self) {
        self.wifi = ProbeStatus::Fail;
        self.internet = ProbeStatus::NotApplicable;
        self.server = ProbeStatus::NotApplicable;
    }

    /// LED pattern for this report.
    ///
    /// WiFi down dominates: the LED is held on, matching the boot state.
    /// Otherwise a slow toggle means everything is reachable and a fast
    /// toggle means at least one probe is not.
    pub fn blink_pattern(&self) -> BlinkPattern {
        if self.wifi != ProbeStatus::Ok {
            return BlinkPattern::Solid;
        }
        if self.internet == ProbeStatus::Ok && self.server == ProbeStatus::Ok {
            BlinkPattern::Blink {
                interval_ms: config::LED_BLINK_INTERVAL_OK_MS,
            }
        } else {
            BlinkPattern::Blink {
                interval_ms: config::LED_BLINK_INTERVAL_FAIL_MS,
            }
        }
    }

    /// The WiFi line of the status screen, 14 columns.
    ///
    /// While disconnected the line shows dots rather than FAIL: the screen
    /// is redrawn throughout the reconnect loop and the dots read as
    /// "working on it".
    pub fn wifi_line(&self) -> &'static str {
        match self.wifi {
            ProbeStatus::Fail => "WiFi:      ...",
            _ => "WiFi:       OK",
        }
    }

    /// The internet line of the status screen, 14 columns
    pub fn internet_line(&self) -> &'static str {
        match self.internet {
            ProbeStatus::Ok => "Internet:   OK",
            ProbeStatus::Fail => "Internet: FAIL",
            ProbeStatus::NotApplicable => "Internet:  N/A",
        }
    }

    /// The server line of the status screen, 14 columns
    pub fn server_line(&self) -> &'static str {
        match self.server {
            ProbeStatus::Ok => "Server:     OK",
            ProbeStatus::Fail => "Server:   FAIL",
            ProbeStatus::NotApplicable => "Server:    N/A",
        }
    }
}

impl Default for StatusReport {
    fn default() -> Self {
        Self::new()
    }
}
