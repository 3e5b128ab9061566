use crate::GarpError;
use garp_packets::MacAddr;
use std::ffi::{CStr, CString};
use std::io;

/// A network interface resolved by name, ready to announce on.
#[derive(Clone, Debug)]
pub struct InterfaceHandle {
    name: String,
    inner: afpacket::Interface,
}

impl InterfaceHandle {
    /// Resolves `name`. Fails with `InterfaceUnavailable` if there is no such interface.
    pub fn by_name(name: &str) -> Result<Self, GarpError> {
        let c_name = CString::new(name).map_err(|e| {
            GarpError::unavailable(name, io::Error::new(io::ErrorKind::InvalidInput, e))
        })?;
        let inner =
            afpacket::Interface::query(&c_name).map_err(|e| GarpError::unavailable(name, e))?;
        Ok(InterfaceHandle {
            name: name.to_owned(),
            inner,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn c_name(&self) -> &CStr {
        self.inner.name()
    }

    pub fn index(&self) -> i32 {
        self.inner.index()
    }

    pub fn is_up(&self) -> bool {
        self.inner.is_up()
    }

    /// The interface's own MAC, the usual sender address for an announcement.
    pub fn hardware_addr(&self) -> MacAddr {
        MacAddr::new(self.inner.hardware_addr())
    }

    /// Checks the interface can take an announcement right now: it still exists under the same
    /// index, it is up, and it speaks Ethernet.
    pub(crate) fn revalidate(&self) -> Result<(), GarpError> {
        let current = afpacket::Interface::query(self.c_name())
            .map_err(|e| GarpError::unavailable(self.name(), e))?;
        LinkState::of(&current).check(self.name(), self.index())
    }
}

/// What the kernel reported for an interface at one point in time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LinkState {
    pub index: i32,
    pub is_up: bool,
    pub is_ethernet: bool,
    pub hardware_type: u16,
}

impl LinkState {
    fn of(iface: &afpacket::Interface) -> Self {
        LinkState {
            index: iface.index(),
            is_up: iface.is_up(),
            is_ethernet: iface.is_ethernet(),
            hardware_type: iface.hardware_type(),
        }
    }

    /// Fails with `InterfaceUnavailable` unless the link still has `expected_index`, is up and
    /// carries Ethernet frames.
    pub(crate) fn check(&self, name: &str, expected_index: i32) -> Result<(), GarpError> {
        if self.index != expected_index {
            return Err(GarpError::unavailable(
                name,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!(
                        "interface index changed from {} to {}",
                        expected_index, self.index
                    ),
                ),
            ));
        }
        if !self.is_up {
            return Err(GarpError::unavailable(
                name,
                io::Error::new(io::ErrorKind::Other, "interface is administratively down"),
            ));
        }
        if !self.is_ethernet {
            return Err(GarpError::unavailable(
                name,
                io::Error::new(
                    io::ErrorKind::Other,
                    format!(
                        "link type {} does not carry Ethernet frames",
                        self.hardware_type
                    ),
                ),
            ));
        }
        Ok(())
    }
}
