#![no_std]

//! BoxLab Status Display Firmware
//!
//! ESP32-C3 firmware that periodically checks WiFi association, upstream
//! internet reachability and the internal lab server, then renders the three
//! results to a Nokia 5110 (PCD8544) LCD and blinks the builtin LED at a
//! rate derived from the same results.

pub mod display;
pub mod led;
pub mod probe;
pub mod status;
pub mod wifi;

/// Firmware version, shown on the splash screen and in every status log line.
pub const VERSION: &str = "1.0.0";

/// Default configuration constants
pub mod config {
    /// Interval between status check cycles in milliseconds
    pub const CHECK_INTERVAL_MS: u64 = 60_000;

    /// Staleness bound of a rendered status in milliseconds (one missed
    /// cycle plus slack); logged with every status line
    pub const CHECK_TTL_MS: u64 = 90_000;

    /// LED toggle interval when internet and server are both reachable
    pub const LED_BLINK_INTERVAL_OK_MS: u64 = 1_000;

    /// LED toggle interval when either probe fails
    pub const LED_BLINK_INTERVAL_FAIL_MS: u64 = 100;

    /// PCD8544 operating voltage (contrast) setting
    pub const LCD_CONTRAST: u8 = 35;

    /// Plaintext connectivity-check URL (Microsoft NCSI)
    pub const INTERNET_PROBE_URL: &str = "http://www.msftncsi.com/ncsi.txt";

    /// Internal lab server, probed over TLS without certificate validation
    pub const SERVER_PROBE_URL: &str = "https://www.boxlab.lazyhorse.net/";

    /// Per-probe timeout in milliseconds
    pub const PROBE_TIMEOUT_MS: u64 = 15_000;

    /// How long the boot splash screen is held
    pub const SPLASH_HOLD_MS: u64 = 5_000;

    /// WiFi configuration
    /// Read from environment variables at compile time
    pub const WIFI_SSID: &str = env!("WIFI_SSID");
    pub const WIFI_PASSWORD: &str = env!("WIFI_PASSWORD");

    /// Status screen redraw cadence while waiting for association
    pub const WIFI_RENDER_INTERVAL_MS: u64 = 1_000;

    /// Association polls between re-issued connect requests
    pub const WIFI_RETRY_POLLS: u32 = 10;
}

/// Error types for the status display board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// WiFi configuration or connection error
    Wifi,
    /// LCD transfer error
    Display,
    /// HTTP probe transport error
    Probe,
}
