//! The capability traits connecting an HTTP client to a platform socket implementation.

use crate::{
    error,
    resolve::{self, ResolvedAddr},
};
use std::{
    io::{self, Read, Write},
    net::SocketAddr,
    time::Duration,
};

/// A socket that dials tunneled addresses instead of network endpoints.
///
/// Implementations go through three states: unconnected on creation, connected after a
/// successful [`connect`](Self::connect), and closed (terminal) after [`close`](Self::close).
/// I/O happens through the `Read` and `Write` supertraits and fails with
/// [`NotConnected`](io::ErrorKind::NotConnected) outside of the connected state.
pub trait FileSocket: Read + Write {
    /// Connects to the path carried by `addr`, blocking the calling thread until the
    /// underlying handle opens, the timeout elapses, or the attempt fails.
    ///
    /// `None` and a zero `timeout` both mean an unbounded wait.
    ///
    /// # Errors
    /// [`InvalidInput`](io::ErrorKind::InvalidInput) if `addr` is not
    /// [`Tunneled`](ResolvedAddr::Tunneled); otherwise whatever the platform open reports,
    /// unchanged and without retry.
    fn connect(&mut self, addr: &ResolvedAddr, timeout: Option<Duration>) -> io::Result<()>;

    /// Whether the underlying handle has been connected. `false` if never connected or closed.
    fn is_connected(&self) -> bool;

    /// Whether [`close`](Self::close) has been called.
    fn is_closed(&self) -> bool;

    /// Closes the underlying handle if present. Idempotent, bounded and fast.
    fn close(&mut self) -> io::Result<()>;
}

/// The socket-creation surface a transport-layer socket factory exposes.
///
/// This and [`lookup`](Self::lookup) are the entire integration surface for an HTTP client:
/// install `lookup` as the client's resolver override and route its socket creation through
/// [`create_socket`](Self::create_socket). The host/port shortcuts are deliberately
/// unsupported: a tunneled transport never has a real network address, so every connection
/// must go through [`FileSocket::connect`] with a resolved address.
pub trait SocketFactory {
    /// The socket type this factory produces.
    type Socket: FileSocket;

    /// Creates an unconnected socket.
    fn create_socket(&self) -> Self::Socket;

    /// The name-resolution hook; see [`resolve::lookup`].
    fn lookup(&self, hostname: &str, port: u16) -> io::Result<Vec<ResolvedAddr>> {
        resolve::lookup(hostname, port)
    }

    /// Unsupported: fails with [`Unsupported`](io::ErrorKind::Unsupported).
    fn connect_host(&self, _host: &str, _port: u16) -> io::Result<Self::Socket> {
        Err(error::unsupported_overload())
    }
    /// Unsupported: fails with [`Unsupported`](io::ErrorKind::Unsupported).
    fn connect_resolved(&self, _addr: SocketAddr) -> io::Result<Self::Socket> {
        Err(error::unsupported_overload())
    }
}
