use std::fmt;
use std::io;
use thiserror::Error;

/// The step of an announcement that produced an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Construction,
    TransportOpen,
    Send,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Construction => write!(f, "construction"),
            Stage::TransportOpen => write!(f, "transport-open"),
            Stage::Send => write!(f, "send"),
        }
    }
}

/// Every way a gratuitous ARP announcement can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum GarpError {
    /// The MAC or IP handed in can't identify a GARP sender.
    #[error("invalid identity: {0}")]
    InvalidIdentity(&'static str),

    /// The interface is missing, down, or can't carry Ethernet frames.
    #[error("interface '{interface}' is unavailable")]
    InterfaceUnavailable {
        interface: String,
        #[source]
        source: io::Error,
    },

    /// Raw link-layer sockets need CAP_NET_RAW.
    #[error("permission denied opening a raw socket on '{interface}' (needs CAP_NET_RAW)")]
    PermissionDenied {
        interface: String,
        #[source]
        source: io::Error,
    },

    /// The kernel refused the frame.
    #[error("failed to send on '{interface}'")]
    SendFailed {
        interface: String,
        #[source]
        source: io::Error,
    },
}

impl GarpError {
    pub fn stage(&self) -> Stage {
        match self {
            GarpError::InvalidIdentity(_) => Stage::Construction,
            GarpError::InterfaceUnavailable { .. } | GarpError::PermissionDenied { .. } => {
                Stage::TransportOpen
            }
            GarpError::SendFailed { .. } => Stage::Send,
        }
    }

    pub(crate) fn unavailable(interface: impl Into<String>, source: io::Error) -> Self {
        GarpError::InterfaceUnavailable {
            interface: interface.into(),
            source,
        }
    }

    /// Sorts an OS error from opening or binding the raw socket into the right kind.
    pub(crate) fn from_open(interface: impl Into<String>, source: io::Error) -> Self {
        let interface = interface.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            GarpError::PermissionDenied { interface, source }
        } else {
            GarpError::InterfaceUnavailable { interface, source }
        }
    }

    pub(crate) fn send_failed(interface: impl Into<String>, source: io::Error) -> Self {
        GarpError::SendFailed {
            interface: interface.into(),
            source,
        }
    }
}
