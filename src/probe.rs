//! HTTP reachability probes
//!
//! One GET per target per check cycle. Anything other than a clean HTTP 200
//! (non-200 status, DNS failure, connect/transport error, timeout) maps to
//! [`ProbeStatus::Fail`]; the next cycle retries unconditionally.

use crate::{Error, config};
use crate::status::ProbeStatus;
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embassy_time::{Duration, with_timeout};
use esp_println::println;
use reqwless::client::{HttpClient, TlsConfig, TlsVerify};
use reqwless::request::Method;
use reqwless::response::{Status, StatusCode};

/// TCP socket buffer size for probe connections
pub const TCP_BUF_SIZE: usize = 4096;

/// TLS record read buffer size (one full TLS record)
pub const TLS_READ_BUF_SIZE: usize = 16_640;

/// TLS record write buffer size
pub const TLS_WRITE_BUF_SIZE: usize = 4_096;

/// Response header buffer size
pub const RX_BUF_SIZE: usize = 4_096;

pub type ProbeTcpState = TcpClientState<1, TCP_BUF_SIZE, TCP_BUF_SIZE>;
pub type ProbeTcpClient<'a> = TcpClient<'a, 1, TCP_BUF_SIZE, TCP_BUF_SIZE>;

/// HTTP(S) prober reused for both targets across all check cycles.
///
/// TLS is configured without certificate validation: the internal server
/// uses a certificate the device has no trust root for, and reachability is
/// all this firmware cares about. Plaintext URLs bypass TLS entirely.
pub struct Prober<'a> {
    client: HttpClient<'a, ProbeTcpClient<'a>, DnsSocket<'a>>,
    rx_buf: &'a mut [u8],
}

impl<'a> Prober<'a> {
    /// Create a prober over the given TCP client and DNS socket.
    ///
    /// `tls_seed` feeds the TLS client's rng; the record buffers must live
    /// as long as the prober.
    pub fn new(
        tcp: &'a ProbeTcpClient<'a>,
        dns: &'a DnsSocket<'a>,
        tls_seed: u64,
        tls_read_buf: &'a mut [u8],
        tls_write_buf: &'a mut [u8],
        rx_buf: &'a mut [u8],
    ) -> Self {
        let tls_config = TlsConfig::new(tls_seed, tls_read_buf, tls_write_buf, TlsVerify::None);
        Self {
            client: HttpClient::new_with_tls(tcp, dns, tls_config),
            rx_buf,
        }
    }

    /// GET `url` and fold the outcome into a tri-state status
    pub async fn probe(&mut self, url: &str) -> ProbeStatus {
        let timeout = Duration::from_millis(config::PROBE_TIMEOUT_MS);
        match with_timeout(timeout, self.get_status(url)).await {
            Ok(Ok(status)) if status == Status::Ok => {
                println!("[PROBE] GET {} -> 200", url);
                ProbeStatus::Ok
            }
            Ok(Ok(status)) => {
                println!("[PROBE] GET {} -> {:?}", url, status);
                ProbeStatus::Fail
            }
            Ok(Err(_)) => {
                println!("[PROBE] GET {} -> transport error", url);
                ProbeStatus::Fail
            }
            Err(_) => {
                println!(
                    "[PROBE] GET {} -> timeout after {}ms",
                    url,
                    config::PROBE_TIMEOUT_MS
                );
                ProbeStatus::Fail
            }
        }
    }

    async fn get_status(&mut self, url: &str) -> Result<StatusCode, Error> {
        let mut request = self
            .client
            .request(Method::GET, url)
            .await
            .map_err(|_| Error::Probe)?;
        let response = request.send(&mut *self.rx_buf).await.map_err(|_| Error::Probe)?;
        Ok(response.status)
    }
}
