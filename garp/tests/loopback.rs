#![cfg(target_os = "linux")]

use garp::{announce, GarpError, GarpIdentity, InterfaceHandle, Stage};
use std::net::{IpAddr, Ipv4Addr};

#[test]
fn missing_interface_fails_before_any_send() {
    let err = InterfaceHandle::by_name("garpnone0").unwrap_err();
    assert!(matches!(err, GarpError::InterfaceUnavailable { .. }));
    assert_eq!(err.stage(), Stage::TransportOpen);
    assert!(err.to_string().contains("garpnone0"));
}

#[test]
fn unprivileged_announce_is_permission_denied() {
    // Root normally holds CAP_NET_RAW, so the send would go through.
    if unsafe { libc::geteuid() } == 0 {
        return;
    }
    let lo = InterfaceHandle::by_name("lo").unwrap();
    if !lo.is_up() {
        return;
    }
    let identity =
        GarpIdentity::new(&[0x02, 0, 0, 0, 0, 1], IpAddr::V4(Ipv4Addr::LOCALHOST)).unwrap();
    let err = announce(&lo, &identity).unwrap_err();
    assert!(matches!(err, GarpError::PermissionDenied { .. }));
    assert_eq!(err.stage(), Stage::TransportOpen);
}

// This test is marked as #[ignore] because it needs to be able to open
// a socket. Opening a socket requires CAP_NET_RAW.
// To run this test on a Linux machine, run the test binary like so:
// > sudo target/<path to test executable> --ignored --test-threads=1
#[test]
#[ignore]
fn announce_on_loopback() {
    let lo = InterfaceHandle::by_name("lo").unwrap();
    let identity =
        GarpIdentity::new(&[0x02, 0, 0, 0, 0, 1], IpAddr::V4(Ipv4Addr::LOCALHOST)).unwrap();

    announce(&lo, &identity).unwrap();
    // Independent broadcasts, nothing carried over.
    announce(&lo, &identity).unwrap();
}
