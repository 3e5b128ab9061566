use crate::builder::{build_arp_frame, envelope};
use crate::{GarpError, GarpIdentity, InterfaceHandle, Transport};
use tracing::{debug, info, info_span, warn};

/// Broadcasts one gratuitous ARP request for `identity` on `handle`.
///
/// Builds the frame, opens a raw socket on the interface, sends once and closes the socket. The
/// first failure is returned as-is; nothing is retried. The socket is released before this
/// returns, on every path.
pub fn announce(handle: &InterfaceHandle, identity: &GarpIdentity) -> Result<(), GarpError> {
    let span = info_span!(
        "announce",
        interface = handle.name(),
        ip = %identity.ip(),
        mac = %identity.mac()
    );
    let _enter = span.enter();

    let arp = build_arp_frame(identity);
    debug!(len = arp.as_bytes().len(), "built gratuitous ARP request");

    let mut transport = match Transport::open(handle) {
        Ok(transport) => transport,
        Err(err) => {
            warn!(stage = %err.stage(), "gratuitous ARP not sent: {}", err);
            return Err(err);
        }
    };
    let frame = envelope(&arp, identity);
    let sent = transport.send(&frame);
    transport.close();

    match sent {
        Ok(()) => {
            info!(len = frame.as_bytes().len(), "gratuitous ARP sent");
            Ok(())
        }
        Err(err) => {
            warn!(stage = %err.stage(), "gratuitous ARP not sent: {}", err);
            Err(err)
        }
    }
}
