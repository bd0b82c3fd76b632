//! WiFi module for the ESP32-C3 status display
//!
//! Handles station-mode association using esp-wifi with embassy-net DHCP.
//! Association is issued here and polled by the check loop, which keeps
//! redrawing the status screen while it waits.

use crate::Error;
use embassy_net::Stack;
use esp_println::println;
use esp_wifi::wifi::{AuthMethod, ClientConfiguration, WifiController};

/// WiFi manager owning the controller and the embassy-net stack handle
pub struct WifiManager<'a> {
    controller: WifiController<'a>,
    stack: Stack<'a>,
}

impl<'a> WifiManager<'a> {
    /// Create a new WiFi manager instance
    pub fn new(controller: WifiController<'a>, stack: Stack<'a>) -> Self {
        Self { controller, stack }
    }

    /// Issue a connection attempt: configure station mode, start the
    /// controller if needed and request the connect. Returns once the
    /// request is accepted; the caller polls [`WifiManager::is_connected`]
    /// for the association itself.
    pub async fn start_connect(&mut self, ssid: &str, password: &str) -> Result<(), Error> {
        println!("[WIFI] Connecting to WiFi network: {}", ssid);

        let client_config = ClientConfiguration {
            ssid: ssid.try_into().map_err(|_| Error::Wifi)?,
            password: password.try_into().map_err(|_| Error::Wifi)?,
            auth_method: AuthMethod::WPA2Personal,
            ..Default::default()
        };

        self.controller
            .set_configuration(&esp_wifi::wifi::Configuration::Client(client_config))
            .map_err(|_| Error::Wifi)?;

        if !matches!(self.controller.is_started(), Ok(true)) {
            self.controller
                .start_async()
                .await
                .map_err(|_| Error::Wifi)?;
        }

        self.controller.connect().map_err(|_| Error::Wifi)
    }

    /// Wait until DHCP has produced an IPv4 configuration and log it
    pub async fn wait_for_ip(&self) {
        self.stack.wait_config_up().await;
        if let Some(ip) = self.ip_address() {
            println!(
                "[WIFI] DHCP IP address: {}.{}.{}.{}",
                ip[0], ip[1], ip[2], ip[3]
            );
        }
    }

    /// Current IPv4 address, if DHCP has completed
    pub fn ip_address(&self) -> Option<[u8; 4]> {
        self.stack
            .config_v4()
            .map(|cfg| cfg.address.address().octets())
    }

    /// Check if the station is associated
    pub fn is_connected(&self) -> bool {
        self.controller.is_connected().unwrap_or(false)
    }
}
