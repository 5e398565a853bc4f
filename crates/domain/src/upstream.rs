use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Standard DNS resolution port, applied when an address omits one.
pub const DNS_PORT: u16 = 53;

/// Address of an upstream resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpstreamAddress(SocketAddr);

impl UpstreamAddress {
    pub fn new(addr: SocketAddr) -> Self {
        Self(addr)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }
}

impl FromStr for UpstreamAddress {
    type Err = DomainError;

    /// Accepts `"1.1.1.1"`, `"2606:4700::1111"`, `"1.1.1.1:5353"` and
    /// `"[2606:4700::1111]:53"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self(addr));
        }
        s.parse::<IpAddr>()
            .map(|ip| Self(SocketAddr::new(ip, DNS_PORT)))
            .map_err(|_| DomainError::InvalidUpstreamAddress(s.to_string()))
    }
}

impl From<SocketAddr> for UpstreamAddress {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl fmt::Display for UpstreamAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upstream pools used by the routing decision. Fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwarderConfig {
    primary: UpstreamAddress,
    secondaries: Vec<UpstreamAddress>,
}

impl ForwarderConfig {
    pub fn new(
        primary: UpstreamAddress,
        secondaries: Vec<UpstreamAddress>,
    ) -> Result<Self, DomainError> {
        if secondaries.is_empty() {
            return Err(DomainError::InvalidForwarderConfig(
                "at least one secondary server is required".to_string(),
            ));
        }
        Ok(Self {
            primary,
            secondaries,
        })
    }

    /// Builds the config from address strings, e.g. straight out of the TOML file.
    pub fn parse<S: AsRef<str>>(primary: &str, secondaries: &[S]) -> Result<Self, DomainError> {
        let primary = primary.parse()?;
        let secondaries = secondaries
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<UpstreamAddress>, _>>()?;
        Self::new(primary, secondaries)
    }

    pub fn primary(&self) -> UpstreamAddress {
        self.primary
    }

    pub fn secondaries(&self) -> &[UpstreamAddress] {
        &self.secondaries
    }

    /// The secondary actually used for routing. Only the first entry is ever
    /// consulted; the rest of the list is carried but not failed over to.
    pub fn active_secondary(&self) -> UpstreamAddress {
        self.secondaries[0]
    }
}
