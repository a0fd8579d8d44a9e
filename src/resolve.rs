//! The name-resolution hook and the address type it produces.
//!
//! [`lookup`] is what a `host:port`-only HTTP client should call in place of its normal DNS
//! step. Hostnames suffixed with [`SOCKET_MARKER`](crate::hostname::SOCKET_MARKER) are never
//! resolved over the network; they come back as a single [`ResolvedAddr::Tunneled`] carrying
//! the hostname itself, which the connect step later decodes into a filesystem path.

use crate::{error::ConnectErrorKind, hostname};
use std::{
    io,
    net::{SocketAddr, ToSocketAddrs},
};

/// A resolved dial target: either a real network address or a tunneled path.
///
/// The `Tunneled` variant carries the full encoded hostname rather than a placeholder IP, so
/// there is no sentinel address that could be mistaken for a routable endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedAddr {
    /// A real network address produced by ordinary system resolution.
    Inet(SocketAddr),
    /// A marker-suffixed hostname carrying a hex-encoded filesystem path.
    Tunneled(String),
}
impl ResolvedAddr {
    /// Builds a tunneled address dialing the given filesystem path.
    pub fn from_path(path: &str) -> io::Result<Self> {
        hostname::encode_hostname(path).map(Self::Tunneled)
    }

    /// Whether this address carries a tunneled path.
    pub const fn is_tunneled(&self) -> bool { matches!(self, Self::Tunneled(..)) }

    /// Recovers the filesystem path carried by a tunneled address.
    ///
    /// # Errors
    /// [`InvalidInput`](io::ErrorKind::InvalidInput) for the `Inet` variant, plus everything
    /// [`decode_hostname`](hostname::decode_hostname) can return.
    pub fn target_path(&self) -> io::Result<String> {
        match self {
            Self::Tunneled(hostname) => hostname::decode_hostname(hostname),
            Self::Inet(..) => Err(ConnectErrorKind::NotTunneled.into()),
        }
    }
}

/// Resolves a hostname the way the tunneled transport sees it.
///
/// Marker-suffixed hostnames yield exactly one [`Tunneled`](ResolvedAddr::Tunneled) address
/// carrying the unmodified input and perform no network lookup. Every other hostname is
/// delegated to the platform resolver together with `port` (which tunneled names ignore).
pub fn lookup(hostname: &str, port: u16) -> io::Result<Vec<ResolvedAddr>> {
    if hostname.ends_with(hostname::SOCKET_MARKER) {
        return Ok(vec![ResolvedAddr::Tunneled(hostname.to_owned())]);
    }
    Ok((hostname, port).to_socket_addrs()?.map(ResolvedAddr::Inet).collect())
}
