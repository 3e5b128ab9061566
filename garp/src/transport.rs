use crate::{GarpError, InterfaceHandle};
use garp_packets::{EthernetFrame, ARP_ETHER_TYPE};
use std::io;
use tracing::debug;

/// A raw ARP socket bound to one interface. The socket is closed when the transport is dropped,
/// whichever way the caller leaves.
pub struct Transport {
    socket: afpacket::BoundSocket,
    interface: String,
}

impl Transport {
    /// Opens a raw socket on `handle` after checking the interface is still there, up and
    /// Ethernet-framed.
    pub fn open(handle: &InterfaceHandle) -> Result<Self, GarpError> {
        handle.revalidate()?;

        let socket = afpacket::Socket::new(ARP_ETHER_TYPE)
            .map_err(|e| GarpError::from_open(handle.name(), e))?;
        let socket = socket
            .bind(handle.c_name())
            .map_err(|e| GarpError::from_open(handle.name(), e))?;

        // The name was resolved twice, once here and once in revalidate. They must agree.
        check_bound_index(handle.name(), handle.index(), socket.interface_index())?;

        debug!(interface = handle.name(), index = handle.index(), "transport opened");
        Ok(Transport {
            socket,
            interface: handle.name().to_owned(),
        })
    }

    /// Hands one frame to the kernel. A short write counts as a failure.
    pub fn send(&mut self, frame: &EthernetFrame) -> Result<(), GarpError> {
        let bytes = frame.as_bytes();
        let sent = self
            .socket
            .send(bytes)
            .map_err(|e| GarpError::send_failed(&self.interface, e))?;
        check_sent(&self.interface, sent, bytes.len())
    }

    /// Releases the socket. Dropping the transport does the same.
    pub fn close(self) {
        debug!(interface = %self.interface, "transport released");
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

fn check_bound_index(interface: &str, expected: i32, bound: i32) -> Result<(), GarpError> {
    if bound != expected {
        return Err(GarpError::unavailable(
            interface,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "interface was replaced while opening (index {} became {})",
                    expected, bound
                ),
            ),
        ));
    }
    Ok(())
}

/// A frame only counts as sent when the kernel took every byte of it.
fn check_sent(interface: &str, sent: usize, len: usize) -> Result<(), GarpError> {
    if sent != len {
        return Err(GarpError::send_failed(
            interface,
            io::Error::new(
                io::ErrorKind::WriteZero,
                format!("kernel accepted {} of {} bytes", sent, len),
            ),
        ));
    }
    Ok(())
}
