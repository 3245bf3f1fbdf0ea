//! Host network identity and client address resolution.

use std::net::IpAddr;

use tracing::{info, warn};

use sessionhub_core::config::ServerIdentityConfig;
use sessionhub_entity::session::NetworkInfo;

/// Reported when no usable interface address is found.
pub const FALLBACK_IP: &str = "0.0.0.0";

/// Reported when no hardware address is found.
pub const FALLBACK_MAC: &str = "00:00:00:00:00:00";

/// Network identity of the serving host, stamped onto every session write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    info: NetworkInfo,
}

impl ServerIdentity {
    /// Use a fixed identity.
    pub fn new(info: NetworkInfo) -> Self {
        Self { info }
    }

    /// Resolve the identity once at startup.
    ///
    /// Configured values win; anything unset is taken from the first
    /// non-loopback IPv4 interface.
    pub fn detect(config: &ServerIdentityConfig) -> Self {
        let detected = match (&config.ip, &config.mac) {
            (Some(_), Some(_)) => None,
            _ => detect_interface(),
        };

        let ip = config
            .ip
            .clone()
            .or_else(|| detected.as_ref().map(|d| d.ip.clone()))
            .unwrap_or_else(|| FALLBACK_IP.to_string());
        let mac = config
            .mac
            .clone()
            .or_else(|| detected.map(|d| d.mac))
            .unwrap_or_else(|| FALLBACK_MAC.to_string());

        info!(ip = %ip, mac = %mac, "Resolved server identity");
        Self::new(NetworkInfo::new(ip, mac))
    }

    /// The identity as recorded on sessions.
    pub fn info(&self) -> &NetworkInfo {
        &self.info
    }

    /// The host IP.
    pub fn ip(&self) -> &str {
        &self.info.ip
    }
}

fn detect_interface() -> Option<NetworkInfo> {
    let interfaces = match local_ip_address::list_afinet_netifas() {
        Ok(list) => list,
        Err(e) => {
            warn!(error = %e, "Could not enumerate network interfaces");
            return None;
        }
    };

    let (name, ip) = interfaces
        .into_iter()
        .find(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())?;

    let mac = match mac_address::mac_address_by_name(&name) {
        Ok(Some(mac)) => mac.to_string(),
        Ok(None) => FALLBACK_MAC.to_string(),
        Err(e) => {
            warn!(interface = %name, error = %e, "Could not read hardware address");
            FALLBACK_MAC.to_string()
        }
    };

    Some(NetworkInfo::new(ip.to_string(), mac))
}

/// Pick the address to record for a client.
///
/// Prefers the first `X-Forwarded-For` entry, then the socket peer. An
/// IPv4-mapped IPv6 address is reported as plain IPv4, and a loopback
/// client is reported as the server's own IP.
pub fn resolve_client_ip(
    forwarded_for: Option<&str>,
    peer: Option<IpAddr>,
    server_ip: &str,
) -> String {
    let forwarded = forwarded_for
        .and_then(|header| header.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    match forwarded.or(peer) {
        Some(ip) => {
            let ip = match ip {
                IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
                v4 => v4,
            };
            if ip.is_loopback() {
                server_ip.to_string()
            } else {
                ip.to_string()
            }
        }
        None => FALLBACK_IP.to_string(),
    }
}
