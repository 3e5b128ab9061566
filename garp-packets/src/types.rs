use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

pub type PacketData = Vec<u8>;

/// EtherType of an ARP payload.
pub const ARP_ETHER_TYPE: u16 = 0x0806;

/// EtherType of an IPv4 payload, also the ARP protocol type for IPv4.
pub const IPV4_PROTOCOL_TYPE: u16 = 0x0800;

/// Dest MAC + Src MAC + EtherType
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Smallest Ethernet II frame on the wire, not counting the FCS.
pub const ETHERNET_MIN_FRAME_LEN: usize = 60;

/// A 48-bit IEEE 802 hardware address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MacAddr {
    pub bytes: [u8; 6],
}

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr { bytes: [0xff; 6] };
    pub const ZERO: MacAddr = MacAddr { bytes: [0; 6] };

    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddr { bytes }
    }

    pub fn is_broadcast(&self) -> bool {
        *self == MacAddr::BROADCAST
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.bytes;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddr::new(bytes)
    }
}

impl TryFrom<&[u8]> for MacAddr {
    type Error = &'static str;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 6 {
            return Err("Hardware address must be exactly 6 bytes");
        }
        let mut mac = [0u8; 6];
        mac.copy_from_slice(bytes);
        Ok(MacAddr::new(mac))
    }
}

/// Error returned when a textual MAC address cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MacParseError(String);

impl fmt::Display for MacParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid MAC address: {}", self.0)
    }
}

impl std::error::Error for MacParseError {}

impl FromStr for MacAddr {
    type Err = MacParseError;

    /// Accepts `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(|c: char| c == ':' || c == '-').collect();
        if parts.len() != 6 {
            return Err(MacParseError(format!(
                "expected 6 octets, got {}",
                parts.len()
            )));
        }
        let mut bytes = [0u8; 6];
        for (idx, part) in parts.iter().enumerate() {
            if part.is_empty() || part.len() > 2 {
                return Err(MacParseError(format!("invalid octet '{}'", part)));
            }
            bytes[idx] = u8::from_str_radix(part, 16)
                .map_err(|_| MacParseError(format!("invalid octet '{}'", part)))?;
        }
        Ok(MacAddr::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let mac = MacAddr::new([0x00, 0x11, 0x22, 0xaa, 0xbb, 0xcc]);
        assert_eq!(mac.to_string(), "00:11:22:aa:bb:cc");
    }

    #[test]
    fn parse_colon_and_dash() {
        let expected = MacAddr::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!("00:11:22:33:44:55".parse::<MacAddr>(), Ok(expected));
        assert_eq!("00-11-22-33-44-55".parse::<MacAddr>(), Ok(expected));
        assert_eq!("0:11:22:33:44:55".parse::<MacAddr>(), Ok(expected));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("00:11:22:33:44".parse::<MacAddr>().is_err());
        assert!("00:11:22:33:44:55:66".parse::<MacAddr>().is_err());
        assert!("00:11:22:33:44:zz".parse::<MacAddr>().is_err());
        assert!("00:11:22:33:44:".parse::<MacAddr>().is_err());
        assert!("001:11:22:33:44:55".parse::<MacAddr>().is_err());
        assert!("".parse::<MacAddr>().is_err());
    }

    #[test]
    fn from_slice() {
        let mac = MacAddr::try_from(&[1u8, 2, 3, 4, 5, 6][..]).unwrap();
        assert_eq!(mac, MacAddr::new([1, 2, 3, 4, 5, 6]));
        assert!(MacAddr::try_from(&[1u8, 2, 3, 4, 5][..]).is_err());
        assert!(MacAddr::try_from(&[1u8, 2, 3, 4, 5, 6, 7][..]).is_err());
    }

    #[test]
    fn broadcast() {
        assert!(MacAddr::BROADCAST.is_broadcast());
        assert!(!MacAddr::ZERO.is_broadcast());
        assert_eq!(MacAddr::BROADCAST.to_string(), "ff:ff:ff:ff:ff:ff");
    }
}
