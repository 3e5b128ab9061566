use crate::*;
use std::convert::TryFrom;
use std::net::Ipv4Addr;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArpOp {
    Request = 1,
    Reply = 2,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArpHardwareType {
    Ethernet = 1,
}

/// Length of the fixed part of an ARP packet, before the variable-length addresses.
pub const ARP_FIXED_LEN: usize = 8;

const HARDWARE_TYPE_RANGE: (usize, usize) = (0, 2);
const PROTOCOL_TYPE_RANGE: (usize, usize) = (2, 4);
const HARDWARE_ADDR_LEN_RANGE: (usize, usize) = (4, 5);
const PROTOCOL_ADDR_LEN_RANGE: (usize, usize) = (5, 6);
const OPCODE_RANGE: (usize, usize) = (6, 8);

///
/// Getters/setters over an ARP packet as described in RFC 826
/// https://tools.ietf.org/html/rfc826
///
/// The frame only holds the ARP payload. Use `EthernetFrame::encap_arp` to put it on the wire.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArpFrame {
    data: PacketData,
}

impl ArpFrame {
    ///
    /// Constructs a new, empty packet with a payload big enough for all ARP fields,
    /// given some hardware/protocol address lengths.
    ///
    pub fn new(hardware_addr_len: u8, protocol_addr_len: u8) -> Self {
        let data = vec![0; arp_len(hardware_addr_len, protocol_addr_len)];

        let mut arp_frame = ArpFrame { data };
        arp_frame.set_hardware_addr_len(hardware_addr_len);
        arp_frame.set_protocol_addr_len(protocol_addr_len);
        arp_frame
    }

    pub fn hardware_type(&self) -> u16 {
        let (start, _) = HARDWARE_TYPE_RANGE;
        self.arp_u16(start)
    }

    pub fn protocol_type(&self) -> u16 {
        let (start, _) = PROTOCOL_TYPE_RANGE;
        self.arp_u16(start)
    }

    pub fn hardware_addr_len(&self) -> u8 {
        let (start, _) = HARDWARE_ADDR_LEN_RANGE;
        self.data[start]
    }

    pub fn protocol_addr_len(&self) -> u8 {
        let (start, _) = PROTOCOL_ADDR_LEN_RANGE;
        self.data[start]
    }

    pub fn opcode(&self) -> u16 {
        let (start, _) = OPCODE_RANGE;
        self.arp_u16(start)
    }

    pub fn sender_hardware_addr(&self) -> &[u8] {
        let (start, end) = self.sender_hardware_addr_range();
        self.arp_data(start, end)
    }

    pub fn sender_protocol_addr(&self) -> &[u8] {
        let (start, end) = self.sender_protocol_addr_range();
        self.arp_data(start, end)
    }

    pub fn target_hardware_addr(&self) -> &[u8] {
        let (start, end) = self.target_hardware_addr_range();
        self.arp_data(start, end)
    }

    pub fn target_protocol_addr(&self) -> &[u8] {
        let (start, end) = self.target_protocol_addr_range();
        self.arp_data(start, end)
    }

    pub fn set_hardware_type(&mut self, htype: u16) {
        let (start, end) = HARDWARE_TYPE_RANGE;
        self.set_arp_data(&htype.to_be_bytes(), start, end);
    }

    pub fn set_protocol_type(&mut self, ptype: u16) {
        let (start, end) = PROTOCOL_TYPE_RANGE;
        self.set_arp_data(&ptype.to_be_bytes(), start, end);
    }

    pub fn set_hardware_addr_len(&mut self, len: u8) {
        let (start, end) = HARDWARE_ADDR_LEN_RANGE;
        self.set_arp_data(&[len], start, end);
    }

    pub fn set_protocol_addr_len(&mut self, len: u8) {
        let (start, end) = PROTOCOL_ADDR_LEN_RANGE;
        self.set_arp_data(&[len], start, end);
    }

    pub fn set_opcode(&mut self, code: u16) {
        let (start, end) = OPCODE_RANGE;
        self.set_arp_data(&code.to_be_bytes(), start, end);
    }

    // The address setters panic if the address lengths in the header don't match the address
    // type, same as `copy_from_slice` would.
    pub fn set_sender_hardware_addr(&mut self, addr: MacAddr) {
        let (start, end) = self.sender_hardware_addr_range();
        self.set_arp_data(&addr.bytes, start, end);
    }

    pub fn set_sender_protocol_addr(&mut self, ip_addr: Ipv4Addr) {
        let (start, end) = self.sender_protocol_addr_range();
        self.set_arp_data(&ip_addr.octets(), start, end);
    }

    pub fn set_target_hardware_addr(&mut self, addr: MacAddr) {
        let (start, end) = self.target_hardware_addr_range();
        self.set_arp_data(&addr.bytes, start, end);
    }

    pub fn set_target_protocol_addr(&mut self, ip_addr: Ipv4Addr) {
        let (start, end) = self.target_protocol_addr_range();
        self.set_arp_data(&ip_addr.octets(), start, end);
    }

    /// A gratuitous packet announces the sender's own protocol address: SPA == TPA.
    pub fn is_gratuitous(&self) -> bool {
        self.sender_protocol_addr() == self.target_protocol_addr()
    }

    /// The serialized ARP packet.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    // Returns the bytes in the ARP packet between start and end, exclusive
    fn arp_data(&self, start: usize, end: usize) -> &[u8] {
        &self.data[start..end]
    }

    fn arp_u16(&self, start: usize) -> u16 {
        u16::from_be_bytes([self.data[start], self.data[start + 1]])
    }

    fn set_arp_data(&mut self, bytes: &[u8], start: usize, end: usize) {
        self.data[start..end].copy_from_slice(bytes);
    }

    fn sender_hardware_addr_range(&self) -> (usize, usize) {
        let hlen = self.hardware_addr_len() as usize;

        let start = ARP_FIXED_LEN;
        let end = start + hlen;
        (start, end)
    }
    fn sender_protocol_addr_range(&self) -> (usize, usize) {
        let hlen = self.hardware_addr_len() as usize;
        let plen = self.protocol_addr_len() as usize;

        let start = ARP_FIXED_LEN + hlen;
        let end = start + plen;
        (start, end)
    }
    fn target_hardware_addr_range(&self) -> (usize, usize) {
        let hlen = self.hardware_addr_len() as usize;
        let plen = self.protocol_addr_len() as usize;

        let start = ARP_FIXED_LEN + hlen + plen;
        let end = start + hlen;
        (start, end)
    }
    fn target_protocol_addr_range(&self) -> (usize, usize) {
        let hlen = self.hardware_addr_len() as usize;
        let plen = self.protocol_addr_len() as usize;

        let start = ARP_FIXED_LEN + (2 * hlen) + plen;
        let end = start + plen;
        (start, end)
    }
}

fn arp_len(hardware_addr_len: u8, protocol_addr_len: u8) -> usize {
    ARP_FIXED_LEN + (2 * hardware_addr_len as usize) + (2 * protocol_addr_len as usize)
}

impl TryFrom<EthernetFrame> for ArpFrame {
    type Error = &'static str;

    ///
    /// Extracts the ARP packet carried by the given EthernetFrame.
    /// Validates
    /// - The frame has an ARP ether type
    /// - The frame has a payload big enough for the hardware/protocol address lengths
    ///
    /// Anything after the ARP packet is Ethernet padding and is dropped.
    ///
    fn try_from(frame: EthernetFrame) -> Result<Self, Self::Error> {
        if frame.ether_type() != ARP_ETHER_TYPE {
            return Err("Frame does not have ARP ether type.");
        };

        let payload = frame.payload();
        if payload.len() < ARP_FIXED_LEN {
            return Err("Frame payload is too small");
        }

        let (hlen_at, _) = HARDWARE_ADDR_LEN_RANGE;
        let (plen_at, _) = PROTOCOL_ADDR_LEN_RANGE;
        let len = arp_len(payload[hlen_at], payload[plen_at]);

        if payload.len() < len {
            return Err("Frame payload doesn't match address length fields");
        }

        Ok(ArpFrame {
            data: payload[..len].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_empty_arp_frame() {
        let arp_frame = ArpFrame::new(6, 4);
        assert_eq!(arp_frame.hardware_type(), 0);
        assert_eq!(arp_frame.protocol_type(), 0);
        assert_eq!(arp_frame.hardware_addr_len(), 6);
        assert_eq!(arp_frame.protocol_addr_len(), 4);
        assert_eq!(arp_frame.opcode(), 0);
        assert_eq!(arp_frame.sender_hardware_addr(), [0, 0, 0, 0, 0, 0]);
        assert_eq!(arp_frame.sender_protocol_addr(), [0, 0, 0, 0]);
        assert_eq!(arp_frame.target_hardware_addr(), [0, 0, 0, 0, 0, 0]);
        assert_eq!(arp_frame.target_protocol_addr(), [0, 0, 0, 0]);
        assert_eq!(arp_frame.as_bytes().len(), 28);
    }

    #[test]
    fn arp_frame_from_ethernet() -> Result<(), String> {
        let arp_payload: Vec<u8> = vec![
            0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01, 1, 2, 3, 4, 5, 6, 10, 0, 0, 1, 10, 9,
            8, 7, 6, 5, 0xff, 0xff, 0xff, 0xff,
        ];
        let mut ethernet_frame = EthernetFrame::empty();
        ethernet_frame.set_payload(&arp_payload);
        ethernet_frame.set_ether_type(ARP_ETHER_TYPE);

        let arp_frame = ArpFrame::try_from(ethernet_frame)?;
        assert_eq!(arp_frame.hardware_type(), ArpHardwareType::Ethernet as u16);
        assert_eq!(arp_frame.protocol_type(), IPV4_PROTOCOL_TYPE);
        assert_eq!(arp_frame.hardware_addr_len(), 6);
        assert_eq!(arp_frame.protocol_addr_len(), 4);
        assert_eq!(arp_frame.opcode(), ArpOp::Request as u16);
        assert_eq!(arp_frame.sender_hardware_addr(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(arp_frame.sender_protocol_addr(), [10, 0, 0, 1]);
        assert_eq!(arp_frame.target_hardware_addr(), [10, 9, 8, 7, 6, 5]);
        assert_eq!(arp_frame.target_protocol_addr(), [0xff, 0xff, 0xff, 0xff]);
        assert!(!arp_frame.is_gratuitous());
        Ok(())
    }

    #[test]
    fn padded_ethernet_frame_decodes() -> Result<(), String> {
        let mut arp = ArpFrame::new(6, 4);
        arp.set_sender_protocol_addr(Ipv4Addr::new(192, 168, 1, 100));
        arp.set_target_protocol_addr(Ipv4Addr::new(192, 168, 1, 100));

        let mut frame = EthernetFrame::encap_arp(&arp);
        frame.pad_to_minimum();
        assert_eq!(frame.payload().len(), 46);

        let decoded = ArpFrame::try_from(frame)?;
        assert_eq!(decoded, arp);
        assert!(decoded.is_gratuitous());
        Ok(())
    }

    #[test]
    fn rejects_wrong_ether_type() {
        let mut frame = EthernetFrame::encap_arp(&ArpFrame::new(6, 4));
        frame.set_ether_type(IPV4_PROTOCOL_TYPE);
        assert_eq!(
            ArpFrame::try_from(frame),
            Err("Frame does not have ARP ether type.")
        );
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut frame = EthernetFrame::empty();
        frame.set_ether_type(ARP_ETHER_TYPE);
        frame.set_payload(&[0x00, 0x01, 0x08, 0x00]);
        assert_eq!(
            ArpFrame::try_from(frame),
            Err("Frame payload is too small")
        );

        let mut frame = EthernetFrame::empty();
        frame.set_ether_type(ARP_ETHER_TYPE);
        frame.set_payload(&[0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01, 1, 2, 3]);
        assert_eq!(
            ArpFrame::try_from(frame),
            Err("Frame payload doesn't match address length fields")
        );
    }

    #[test]
    fn setters_use_network_byte_order() {
        let mut arp = ArpFrame::new(6, 4);
        arp.set_hardware_type(ArpHardwareType::Ethernet as u16);
        arp.set_protocol_type(IPV4_PROTOCOL_TYPE);
        arp.set_opcode(ArpOp::Reply as u16);
        arp.set_sender_hardware_addr(MacAddr::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]));
        arp.set_target_hardware_addr(MacAddr::BROADCAST);

        let bytes = arp.as_bytes();
        assert_eq!(&bytes[0..8], &[0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x02]);
        assert_eq!(&bytes[8..14], &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(&bytes[18..24], &[0xff; 6]);
    }
}
