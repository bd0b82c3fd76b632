//! Builtin status LED control
//!
//! The LED is active low. A dedicated task derives the blink pattern from
//! the shared status report: held on while WiFi is down, slow toggle when
//! everything is reachable, fast toggle otherwise.

use crate::status::{BlinkPattern, StatusReport};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};
use esp_hal::gpio::Output;
use esp_println::println;

/// Shared status report, written by the check loop and read here
pub type StatusMutex = Mutex<CriticalSectionRawMutex, StatusReport>;

/// How often the pattern is re-evaluated while the LED is held solid
const SOLID_POLL_MS: u64 = 100;

/// Builtin status LED (active low)
pub struct StatusLed {
    pin: Output<'static>,
}

impl StatusLed {
    /// Wrap the LED pin and turn it on for the initialization phase
    pub fn new(mut pin: Output<'static>) -> Self {
        pin.set_low();
        Self { pin }
    }

    pub fn set_on(&mut self) {
        self.pin.set_low();
    }

    pub fn toggle(&mut self) {
        self.pin.toggle();
    }
}

/// Blink the LED according to the shared report.
///
/// The pattern is re-read on every toggle, so a status change takes effect
/// within one blink interval.
#[embassy_executor::task]
pub async fn led_task(mut led: StatusLed, report: &'static StatusMutex) -> ! {
    println!("[LED] Status LED task started");

    loop {
        let pattern = report.lock().await.blink_pattern();
        match pattern {
            BlinkPattern::Solid => {
                led.set_on();
                Timer::after(Duration::from_millis(SOLID_POLL_MS)).await;
            }
            BlinkPattern::Blink { interval_ms } => {
                led.toggle();
                Timer::after(Duration::from_millis(interval_ms)).await;
            }
        }
    }
}
