//! Unix-specific functionality: the [`FileSocket`] implementation backed by a Unix domain
//! stream socket.

mod c_wrappers;

use crate::{
    error::ConnectErrorKind,
    resolve::ResolvedAddr,
    socket::{FileSocket, SocketFactory},
};
use std::{
    io::{self, IoSlice, IoSliceMut, Read, Write},
    net::Shutdown,
    os::unix::net::{UnixListener, UnixStream},
    path::Path,
    time::Duration,
};
use tracing::debug;

/// [`FileSocket`] that connects to a Unix domain socket file at the decoded path.
///
/// A nonzero connect timeout is enforced with a nonblocking `connect(2)` followed by
/// `poll(2)` and is then also installed as the stream's read timeout. Stream accessors hand
/// out duplicates of the connected handle; [`close`](FileSocket::close) shuts the socket down
/// before dropping it, so blocked reads on duplicates observe EOF rather than hanging on a
/// handle that is already gone. Interrupting an in-flight read on *this* value from another
/// thread is not part of the contract, since `close` takes an exclusive borrow.
#[derive(Debug, Default)]
pub struct UnixSocket {
    stream: Option<UnixStream>,
    closed: bool,
}

impl UnixSocket {
    /// Creates an unconnected socket.
    pub fn new() -> Self { Self::default() }

    /// Binds a listening socket at the path carried by `addr`, delegating to the native
    /// listener.
    ///
    /// # Errors
    /// [`InvalidInput`](io::ErrorKind::InvalidInput) if `addr` is not tunneled; otherwise
    /// whatever the bind reports.
    pub fn bind(addr: &ResolvedAddr) -> io::Result<UnixListener> {
        UnixListener::bind(addr.target_path()?)
    }

    fn stream(&self) -> io::Result<&UnixStream> {
        self.stream.as_ref().ok_or_else(|| ConnectErrorKind::NotConnected.into())
    }

    /// Duplicates the connected stream for receiving.
    ///
    /// The duplicate shares the socket: shutting the socket down via
    /// [`close`](FileSocket::close) ends reads on it with EOF.
    pub fn recv_half(&self) -> io::Result<UnixStream> { self.stream()?.try_clone() }
    /// Duplicates the connected stream for sending.
    pub fn send_half(&self) -> io::Result<UnixStream> { self.stream()?.try_clone() }

    /// Borrows the [`UnixStream`] contained within, granting access to operations defined on
    /// it.
    pub fn inner(&self) -> Option<&UnixStream> { self.stream.as_ref() }
}

impl FileSocket for UnixSocket {
    fn connect(&mut self, addr: &ResolvedAddr, timeout: Option<Duration>) -> io::Result<()> {
        let path = addr.target_path()?;
        debug!(%path, "connecting to Unix domain socket");
        let timeout = timeout.filter(|t| !t.is_zero());
        let stream = match timeout {
            Some(t) => c_wrappers::connect_with_timeout(Path::new(&path), t)?,
            None => UnixStream::connect(&path)?,
        };
        stream.set_read_timeout(timeout)?;
        self.stream = Some(stream);
        self.closed = false;
        Ok(())
    }

    fn is_connected(&self) -> bool { self.stream.is_some() }
    fn is_closed(&self) -> bool { self.closed }

    fn close(&mut self) -> io::Result<()> {
        if let Some(stream) = self.stream.take() {
            // Duplicated halves stay open; shutdown makes their reads return EOF.
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.closed = true;
        Ok(())
    }
}

impl Read for UnixSocket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut stream = self.stream()?;
        stream.read(buf)
    }
    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        let mut stream = self.stream()?;
        stream.read_vectored(bufs)
    }
}
impl Write for UnixSocket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut stream = self.stream()?;
        stream.write(buf)
    }
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let mut stream = self.stream()?;
        stream.write_vectored(bufs)
    }
    #[inline]
    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

/// [`SocketFactory`] producing [`UnixSocket`]s.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnixSocketFactory;
impl SocketFactory for UnixSocketFactory {
    type Socket = UnixSocket;

    #[inline]
    fn create_socket(&self) -> UnixSocket { UnixSocket::new() }
}
