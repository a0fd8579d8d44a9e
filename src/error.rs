//! Error kinds specific to the tunneled transport.
//!
//! Everything fallible in this crate returns [`io::Result`](std::io::Result); the kinds here
//! exist to give the two argument-shape failures a stable identity instead of stringly-typed
//! errors. OS-level failures are propagated as raw [`io::Error`](std::io::Error)s, unchanged
//! and without retry.

use std::{
    fmt::{self, Display, Formatter},
    io,
};

/// Ways a socket operation can be handed state it cannot work with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// `connect` was given a real network address rather than a tunneled path.
    NotTunneled,
    /// A stream accessor or I/O operation was used before a successful `connect`.
    NotConnected,
}
impl ConnectErrorKind {
    const fn msg(self) -> &'static str {
        use ConnectErrorKind::*;
        match self {
            NotTunneled => "expected an address carrying a tunneled path",
            NotConnected => "socket has not been connected",
        }
    }
    const fn io_kind(self) -> io::ErrorKind {
        match self {
            Self::NotTunneled => io::ErrorKind::InvalidInput,
            Self::NotConnected => io::ErrorKind::NotConnected,
        }
    }
}
impl From<ConnectErrorKind> for io::Error {
    fn from(e: ConnectErrorKind) -> Self { io::Error::new(e.io_kind(), e.msg()) }
}
impl Display for ConnectErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(self.msg()) }
}

/// Socket-creation shortcuts that imply a real network address are never available on this
/// transport.
#[cold]
pub(crate) fn unsupported_overload() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "this transport has no real network address; create an unconnected socket and connect \
         it to a tunneled address",
    )
}
