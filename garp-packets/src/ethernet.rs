use crate::*;
use std::borrow::Cow;

#[derive(Clone, Debug)]
pub struct EthernetFrame {
    pub data: PacketData,
    pub layer2_offset: usize,
    pub payload_offset: usize,
}

impl EthernetFrame {
    pub fn from_buffer(
        frame: PacketData,
        layer2_offset: usize,
    ) -> Result<EthernetFrame, &'static str> {
        // Ethernet II frames must be at least the header, which is 14bytes
        // 0                    6                    12                      14
        // |---6 byte Dest_MAC--|---6 byte Src_MAC---|--2 Byte EtherType---|
        // 802.1Q tags are not supported, so the payload always starts right after the EtherType.

        if frame.len() < layer2_offset + ETHERNET_HEADER_LEN {
            return Err("Frame is less than the minimum of 14 bytes");
        }

        Ok(EthernetFrame {
            data: frame,
            layer2_offset,
            payload_offset: ETHERNET_HEADER_LEN + layer2_offset,
        })
    }

    /// Returns an empty EthernetFrame where all values all populated to zero. This function allocates a
    /// new array to hold the header.
    pub fn empty() -> EthernetFrame {
        EthernetFrame {
            data: vec![0; ETHERNET_HEADER_LEN],
            layer2_offset: 0,
            payload_offset: ETHERNET_HEADER_LEN,
        }
    }

    pub fn dest_mac(&self) -> MacAddr {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&self.data[self.layer2_offset..self.layer2_offset + 6]);
        MacAddr::new(bytes)
    }

    pub fn src_mac(&self) -> MacAddr {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&self.data[self.layer2_offset + 6..self.layer2_offset + 12]);
        MacAddr::new(bytes)
    }

    pub fn set_dest_mac(&mut self, mac: MacAddr) {
        let start = self.layer2_offset;
        self.data[start..start + 6].copy_from_slice(&mac.bytes);
    }

    pub fn set_src_mac(&mut self, mac: MacAddr) {
        let start = self.layer2_offset + 6;
        self.data[start..start + 6].copy_from_slice(&mac.bytes);
    }

    pub fn ether_type(&self) -> u16 {
        let start = self.layer2_offset + 12;
        u16::from_be_bytes([self.data[start], self.data[start + 1]])
    }

    pub fn set_ether_type(&mut self, ether_type: u16) {
        let start = self.layer2_offset + 12;
        self.data[start..start + 2].copy_from_slice(&ether_type.to_be_bytes());
    }

    // This gives you a cow of a slice of the payload.
    pub fn payload(&self) -> Cow<[u8]> {
        Cow::from(&self.data[self.payload_offset..])
    }

    pub fn set_payload(&mut self, payload: &[u8]) {
        self.data.truncate(self.payload_offset);
        self.data.reserve_exact(payload.len());
        self.data.extend(payload);
    }

    /// Bytes that go on the wire, starting at the Ethernet header.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[self.layer2_offset..]
    }

    /// Zero-pads the frame up to the 60 byte Ethernet minimum. Frames that are already long
    /// enough are left alone.
    pub fn pad_to_minimum(&mut self) {
        let min_len = self.layer2_offset + ETHERNET_MIN_FRAME_LEN;
        if self.data.len() < min_len {
            self.data.resize(min_len, 0);
        }
    }

    pub fn encap_arp(arp: &ArpFrame) -> EthernetFrame {
        let mut frame = EthernetFrame::empty();
        frame.set_payload(arp.as_bytes());
        frame.set_ether_type(ARP_ETHER_TYPE);
        frame
    }
}

/// EthernetFrames are considered the same if they have the same data from the layer 2
/// header and onward. This function does not consider the data before the start of the
/// Ethernet header
impl PartialEq for EthernetFrame {
    fn eq(&self, other: &Self) -> bool {
        self.data[self.layer2_offset..] == other.data[other.layer2_offset..]
    }
}

impl Eq for EthernetFrame {}
