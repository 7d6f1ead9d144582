//! Login-context checks: business-hours window and network-range gate
//!
//! Both checks mirror what the browser client used to enforce: they run on
//! this process's local clock and a public IP-echo lookup, are trivially
//! spoofable, and provide no real security boundary. The network lookup
//! fails open when the echo service is unreachable, trading security for
//! availability exactly like the original.

use crate::core::error::{Error, Result};
use serde::Deserialize;
use std::net::IpAddr;

/// First hour of the allowed login window (inclusive)
pub const OPEN_HOUR: u32 = 6;
/// Last hour of the allowed login window (inclusive)
pub const CLOSE_HOUR: u32 = 22;

/// Default public IP-echo service
pub const DEFAULT_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

/// Reject logins outside the 06:00-22:59 local window
pub fn check_login_window(hour: u32) -> Result<()> {
    if (OPEN_HOUR..=CLOSE_HOUR).contains(&hour) {
        Ok(())
    } else {
        Err(Error::OutOfHours { hour })
    }
}

/// IP-echo service payload
#[derive(Debug, Deserialize)]
struct IpEcho {
    ip: String,
}

/// Best-effort check that the caller's public address is on a private network
pub struct NetworkGate {
    client: reqwest::Client,
    lookup_url: String,
}

impl NetworkGate {
    /// Create a gate using the shared HTTP client
    pub fn new(client: reqwest::Client, lookup_url: impl Into<String>) -> Self {
        Self {
            client,
            lookup_url: lookup_url.into(),
        }
    }

    /// Run the network check.
    ///
    /// Succeeds for RFC 1918 addresses and loopback. Any lookup failure
    /// (offline, echo service down, unparseable payload) passes open.
    pub async fn check(&self) -> Result<()> {
        let address = match self.lookup().await {
            Ok(address) => address,
            Err(err) => {
                tracing::debug!("address lookup failed, passing open: {err}");
                return Ok(());
            }
        };

        if address_allowed(&address) {
            Ok(())
        } else {
            Err(Error::NetworkNotAllowed {
                address: address.to_string(),
            })
        }
    }

    async fn lookup(&self) -> Result<IpAddr> {
        let echo: IpEcho = self
            .client
            .get(&self.lookup_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        echo.ip
            .parse()
            .map_err(|_| Error::internal(format!("unparseable echo address: {}", echo.ip)))
    }
}

/// Allowed ranges: 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16, loopback
pub fn address_allowed(address: &IpAddr) -> bool {
    match address {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => v6.is_loopback(),
    }
}
