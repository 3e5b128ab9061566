#![cfg(target_os = "linux")]

// Kept alone in its own test binary: counting descriptors only works when no other test runs
// at the same time.

use garp::{announce, GarpError, GarpIdentity, InterfaceHandle, Transport};
use std::fs;
use std::net::{IpAddr, Ipv4Addr};

fn open_descriptors() -> usize {
    fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
fn transport_never_leaks_descriptors() {
    // Warm up anything lazily initialised by the first lookup.
    let _ = InterfaceHandle::by_name("lo");
    let _ = InterfaceHandle::by_name("garpnone0");

    let before = open_descriptors();

    for _ in 0..64 {
        let err = InterfaceHandle::by_name("garpnone0").unwrap_err();
        assert!(matches!(err, GarpError::InterfaceUnavailable { .. }));

        // Success or PermissionDenied depending on the privileges we run with; either way the
        // socket must be gone afterwards.
        if let Ok(lo) = InterfaceHandle::by_name("lo") {
            let _ = Transport::open(&lo).map(Transport::close);

            let identity =
                GarpIdentity::new(&[0x02, 0, 0, 0, 0, 1], IpAddr::V4(Ipv4Addr::LOCALHOST))
                    .unwrap();
            let _ = announce(&lo, &identity);
        }
    }

    assert_eq!(open_descriptors(), before);
}
