// ── Address value types ──
//
// Interfaces store their addresses as the strings they were given; these
// types exist to check that those strings are well formed.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("invalid MAC address: {0}")]
    InvalidMac(String),
}

// ── Ipv4Cidr ────────────────────────────────────────────────────────

/// IPv4 address with prefix length. Host bits may be set (`10.0.0.5/24`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Cidr {
    pub address: Ipv4Addr,
    pub prefix_len: u8,
}

impl Ipv4Cidr {
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self, AddressError> {
        if prefix_len > 32 {
            return Err(AddressError::InvalidCidr(format!(
                "prefix length {prefix_len} exceeds 32"
            )));
        }
        Ok(Self {
            address,
            prefix_len,
        })
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for Ipv4Cidr {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .split_once('/')
            .ok_or_else(|| AddressError::InvalidCidr(format!("'{s}' has no prefix length")))?;

        let address = addr
            .parse::<Ipv4Addr>()
            .map_err(|e| AddressError::InvalidCidr(format!("'{s}': {e}")))?;

        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressError::InvalidCidr(format!(
                "'{s}': prefix length must be a number"
            )));
        }
        let prefix_len = prefix
            .parse::<u8>()
            .map_err(|e| AddressError::InvalidCidr(format!("'{s}': {e}")))?;

        Self::new(address, prefix_len)
    }
}

// ── MacAddr ─────────────────────────────────────────────────────────

/// Strict six-octet, colon-separated MAC address (`aa:bb:cc:dd:ee:ff`).
///
/// Unlike looser parsers, dashes, bare hex and short forms are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr([u8; 6]);

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddr {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || AddressError::InvalidMac(format!("'{s}' is not six colon-separated hex pairs"));

        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for octet in &mut octets {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(octets))
    }
}
