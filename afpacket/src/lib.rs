#![cfg(target_os = "linux")]
mod linux;
mod netdev;
mod sockets;

pub use netdev::Interface;
pub use sockets::{BoundSocket, Socket};
