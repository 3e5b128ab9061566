use crate::GarpIdentity;
use garp_packets::{ArpFrame, ArpHardwareType, ArpOp, EthernetFrame, MacAddr, IPV4_PROTOCOL_TYPE};

/// What goes in the target hardware field of every announcement. Implementations disagree
/// between broadcast, zero and the sender's own MAC; we always use broadcast.
pub const GARP_TARGET_HARDWARE_ADDR: MacAddr = MacAddr::BROADCAST;

/// Builds the ARP request announcing `identity`: sender and target protocol addresses are both
/// the identity's IP.
pub fn build_arp_frame(identity: &GarpIdentity) -> ArpFrame {
    let mut arp = ArpFrame::new(6, 4);
    arp.set_hardware_type(ArpHardwareType::Ethernet as u16);
    arp.set_protocol_type(IPV4_PROTOCOL_TYPE);
    arp.set_opcode(ArpOp::Request as u16);
    arp.set_sender_hardware_addr(identity.mac());
    arp.set_sender_protocol_addr(identity.ip());
    arp.set_target_hardware_addr(GARP_TARGET_HARDWARE_ADDR);
    arp.set_target_protocol_addr(identity.ip());
    arp
}

/// Wraps an ARP frame in a broadcast Ethernet II header from the identity's MAC, padded to the
/// Ethernet minimum.
pub fn envelope(arp: &ArpFrame, identity: &GarpIdentity) -> EthernetFrame {
    let mut frame = EthernetFrame::encap_arp(arp);
    frame.set_dest_mac(MacAddr::BROADCAST);
    frame.set_src_mac(identity.mac());
    frame.pad_to_minimum();
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use garp_packets::{ARP_ETHER_TYPE, ETHERNET_MIN_FRAME_LEN};
    use rand::{self, Rng};
    use std::convert::TryFrom;
    use std::net::{IpAddr, Ipv4Addr};

    fn identity(mac: [u8; 6], ip: Ipv4Addr) -> GarpIdentity {
        GarpIdentity::new(&mac, IpAddr::V4(ip)).unwrap()
    }

    #[test]
    fn known_payload_layout() {
        let id = identity(
            [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            Ipv4Addr::new(192, 168, 1, 100),
        );
        let arp = build_arp_frame(&id);
        let bytes = arp.as_bytes();

        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[0..2], &[0x00, 0x01]);
        assert_eq!(&bytes[2..4], &[0x08, 0x00]);
        assert_eq!(&bytes[4..6], &[6, 4]);
        assert_eq!(&bytes[6..8], &[0x00, 0x01]);
        assert_eq!(&bytes[8..14], &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(&bytes[14..18], &[0xc0, 0xa8, 0x01, 0x64]);
        assert_eq!(&bytes[18..24], &[0xff; 6]);
        assert_eq!(&bytes[24..28], &[0xc0, 0xa8, 0x01, 0x64]);
    }

    #[test]
    fn random_identities_are_announced_verbatim() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let mut mac = [0u8; 6];
            rng.fill(&mut mac[..]);
            let mut ip = [0u8; 4];
            rng.fill(&mut ip[..]);
            let ip = Ipv4Addr::from(ip);
            if ip.is_unspecified() {
                continue;
            }

            let arp = build_arp_frame(&identity(mac, ip));
            assert_eq!(arp.sender_hardware_addr(), mac);
            assert_eq!(arp.sender_protocol_addr(), ip.octets());
            assert_eq!(arp.target_protocol_addr(), arp.sender_protocol_addr());
            assert!(arp.is_gratuitous());
            assert_eq!(arp.opcode(), ArpOp::Request as u16);
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let id = identity([0x02, 0, 0, 0, 0, 1], Ipv4Addr::new(10, 1, 2, 3));
        let first = envelope(&build_arp_frame(&id), &id);
        let second = envelope(&build_arp_frame(&id), &id);
        assert_eq!(first, second);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn envelope_is_a_broadcast_arp_frame() {
        let id = identity(
            [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
            Ipv4Addr::new(192, 168, 1, 100),
        );
        let arp = build_arp_frame(&id);
        let frame = envelope(&arp, &id);

        assert_eq!(frame.dest_mac(), MacAddr::BROADCAST);
        assert_eq!(frame.src_mac(), id.mac());
        assert_eq!(frame.ether_type(), ARP_ETHER_TYPE);
        assert_eq!(frame.as_bytes().len(), ETHERNET_MIN_FRAME_LEN);
        assert_eq!(&frame.payload()[..28], arp.as_bytes());
        assert!(frame.payload()[28..].iter().all(|b| *b == 0));

        let decoded = ArpFrame::try_from(frame).unwrap();
        assert_eq!(decoded, arp);
    }
}
