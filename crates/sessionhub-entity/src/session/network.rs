//! Network identity value object.

use serde::{Deserialize, Serialize};

/// IP and hardware address pair for one end of a session.
///
/// On a client record `mac` holds the cipher token, never the plain address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// IP address in text form.
    pub ip: String,
    /// Hardware address, or its encrypted token for client info.
    pub mac: String,
}

impl NetworkInfo {
    /// Create a network identity.
    pub fn new(ip: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            mac: mac.into(),
        }
    }
}
