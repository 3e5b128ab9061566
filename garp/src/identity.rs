use crate::GarpError;
use garp_packets::MacAddr;
use std::convert::TryFrom;
use std::net::{IpAddr, Ipv4Addr};

/// The (MAC, IPv4) pair a host announces. A value of this type is always a usable GARP sender.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GarpIdentity {
    mac: MacAddr,
    ip: Ipv4Addr,
}

impl GarpIdentity {
    /// Validates a sender identity.
    ///
    /// The MAC must be exactly 6 bytes. The address must be IPv4 and not `0.0.0.0`; every IPv6
    /// address is rejected, including IPv4-mapped ones.
    pub fn new(mac: &[u8], ip: IpAddr) -> Result<Self, GarpError> {
        let mac = MacAddr::try_from(mac).map_err(GarpError::InvalidIdentity)?;
        let ip = match ip {
            IpAddr::V4(ip) => ip,
            IpAddr::V6(_) => {
                return Err(GarpError::InvalidIdentity(
                    "gratuitous ARP only announces IPv4 addresses",
                ))
            }
        };
        if ip.is_unspecified() {
            return Err(GarpError::InvalidIdentity(
                "0.0.0.0 can't be announced as a sender address",
            ));
        }
        Ok(GarpIdentity { mac, ip })
    }

    pub fn mac(&self) -> MacAddr {
        self.mac
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }
}
