#![allow(non_camel_case_types)]
// Most union members are never read, but they have to be declared for the layout to match the
// kernel's `struct ifreq`.
#![allow(dead_code)]

use libc;
use std::{ffi::CStr, io, mem::MaybeUninit};

// Resources:
// man 7 netdevice
// /usr/include/linux/sockios.h
pub(crate) const SIOCGIFFLAGS: libc::c_ulong = 0x8913;
pub(crate) const SIOCGIFHWADDR: libc::c_ulong = 0x8927;
pub(crate) const SIOCGIFINDEX: libc::c_ulong = 0x8933;

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct ifmap {
    pub(crate) mem_start: libc::c_ulong,
    pub(crate) mem_end: libc::c_ulong,
    pub(crate) base_addr: libc::c_ushort,
    pub(crate) irq: libc::c_uchar,
    pub(crate) dma: libc::c_uchar,
    pub(crate) port: libc::c_uchar,
}

#[repr(C)]
pub(crate) union ifru {
    pub(crate) ifru_addr: libc::sockaddr,
    pub(crate) ifru_dstaddr: libc::sockaddr,
    pub(crate) ifru_netmask: libc::sockaddr,
    pub(crate) ifru_hwaddr: libc::sockaddr,
    pub(crate) ifru_flags: libc::c_short,
    pub(crate) ifru_ivalue: libc::c_int,
    pub(crate) ifru_mtu: libc::c_int,
    pub(crate) ifru_map: ifmap,
    pub(crate) ifru_slave: [libc::c_char; libc::IFNAMSIZ],
    pub(crate) ifru_newname: [libc::c_char; libc::IFNAMSIZ],
}

#[repr(C)]
pub(crate) union ifrn {
    pub(crate) ifrn_name: [libc::c_char; libc::IFNAMSIZ],
}

#[repr(C)]
pub(crate) struct ifreq {
    pub(crate) ifr_ifrn: ifrn,
    pub(crate) ifr_ifru: ifru,
}

impl ifreq {
    /// Builds a zeroed request for the named interface. The name must fit in `IFNAMSIZ`
    /// including its NUL terminator.
    pub(crate) fn with_name(name: &CStr) -> io::Result<ifreq> {
        let bytes = name.to_bytes();
        if bytes.is_empty() || bytes.len() >= libc::IFNAMSIZ {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "interface name must be between 1 and 15 bytes",
            ));
        }
        // All-zero is a valid bit pattern for every field of ifreq.
        let mut ifr: ifreq = unsafe { MaybeUninit::zeroed().assume_init() };
        // Writing a Copy field of a union is safe; the trailing bytes stay NUL.
        let mut name_buf = [0 as libc::c_char; libc::IFNAMSIZ];
        for (dst, src) in name_buf.iter_mut().zip(bytes) {
            *dst = *src as libc::c_char;
        }
        ifr.ifr_ifrn.ifrn_name = name_buf;
        Ok(ifr)
    }
}
