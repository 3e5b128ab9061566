#![deny(missing_docs)]

use crate::linux;
use libc;
use std::{
    ffi::{CStr, CString},
    io,
};

/// A snapshot of a network interface, as reported by the netdevice ioctls. Querying does not
/// need any privilege; the values may be stale as soon as they are returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interface {
    name: CString,
    index: libc::c_int,
    flags: libc::c_int,
    hardware_type: u16,
    hardware_addr: [u8; 6],
}

impl Interface {
    /// Looks up an interface by name. Fails with the kernel's error (usually `ENODEV`) if there
    /// is no such interface, or with `InvalidInput` if the name can't be an interface name.
    pub fn query(name: impl AsRef<CStr>) -> io::Result<Self> {
        let name = name.as_ref();
        let mut ifr = linux::ifreq::with_name(name)?;
        let ctl = ControlSocket::new()?;

        ctl.ioctl(linux::SIOCGIFINDEX, &mut ifr)?;
        // Reading union fields is unsafe, but the ioctl that just succeeded is documented to
        // fill exactly this member (man 7 netdevice).
        let index = unsafe { ifr.ifr_ifru.ifru_ivalue };

        ctl.ioctl(linux::SIOCGIFFLAGS, &mut ifr)?;
        // ifr_flags is a short, but IFF_* constants are ints; don't sign-extend bit 15.
        let flags = unsafe { ifr.ifr_ifru.ifru_flags } as u16 as libc::c_int;

        ctl.ioctl(linux::SIOCGIFHWADDR, &mut ifr)?;
        let hwaddr = unsafe { ifr.ifr_ifru.ifru_hwaddr };
        let mut hardware_addr = [0u8; 6];
        for (dst, src) in hardware_addr.iter_mut().zip(hwaddr.sa_data.iter()) {
            *dst = *src as u8;
        }

        Ok(Interface {
            name: name.to_owned(),
            index,
            flags,
            hardware_type: hwaddr.sa_family,
            hardware_addr,
        })
    }

    /// The interface name.
    pub fn name(&self) -> &CStr {
        &self.name
    }

    /// The kernel's index for this interface.
    pub fn index(&self) -> libc::c_int {
        self.index
    }

    /// Raw `IFF_*` flags.
    pub fn flags(&self) -> libc::c_int {
        self.flags
    }

    /// True if the interface is administratively up (`IFF_UP`).
    pub fn is_up(&self) -> bool {
        self.flags & libc::IFF_UP == libc::IFF_UP
    }

    /// True for the loopback device (`IFF_LOOPBACK`).
    pub fn is_loopback(&self) -> bool {
        self.flags & libc::IFF_LOOPBACK == libc::IFF_LOOPBACK
    }

    /// The link-layer type, an `ARPHRD_*` value.
    pub fn hardware_type(&self) -> u16 {
        self.hardware_type
    }

    /// True if frames on this interface use Ethernet II framing.
    pub fn is_ethernet(&self) -> bool {
        self.hardware_type == libc::ARPHRD_ETHER || self.hardware_type == libc::ARPHRD_LOOPBACK
    }

    /// The first six bytes of the interface's hardware address.
    pub fn hardware_addr(&self) -> [u8; 6] {
        self.hardware_addr
    }
}

/// An `AF_INET` datagram socket, only used as a handle for netdevice ioctls.
struct ControlSocket {
    fd: libc::c_int,
}

impl ControlSocket {
    fn new() -> io::Result<Self> {
        // Datagram sockets don't need CAP_NET_RAW, unlike the AF_PACKET socket we'd otherwise
        // have to open for this.
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, 0) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(ControlSocket { fd })
    }

    fn ioctl(&self, request: libc::c_ulong, ifr: &mut linux::ifreq) -> io::Result<()> {
        // The kernel reads the name out of `ifr` and writes one member of the union; both live
        // in memory we exclusively borrow for the duration of the call.
        let err = unsafe { libc::ioctl(self.fd, request, ifr as *mut linux::ifreq) };
        if err < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Drop for ControlSocket {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}
