//! Announces a host on its Ethernet segment with a single gratuitous ARP request.
//!
//! ```no_run
//! use garp::{announce, GarpIdentity, InterfaceHandle};
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! let handle = InterfaceHandle::by_name("eth0")?;
//! let identity = GarpIdentity::new(
//!     &handle.hardware_addr().bytes,
//!     IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100)),
//! )?;
//! announce(&handle, &identity)?;
//! # Ok::<(), garp::GarpError>(())
//! ```
#![cfg(target_os = "linux")]

mod announce;
mod builder;
pub mod config;
mod error;
mod identity;
mod interface;
mod transport;

pub use announce::announce;
pub use builder::{build_arp_frame, envelope, GARP_TARGET_HARDWARE_ADDR};
pub use error::{GarpError, Stage};
pub use identity::GarpIdentity;
pub use interface::InterfaceHandle;
pub use transport::Transport;
