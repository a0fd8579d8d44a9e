//! Windows-specific functionality: the [`FileSocket`] implementation backed by a named pipe.

mod c_wrappers;
mod file_handle;

use file_handle::FileHandle;

use crate::{
    error::ConnectErrorKind,
    resolve::ResolvedAddr,
    socket::{FileSocket, SocketFactory},
};
use std::{
    io::{self, Read, Write},
    sync::Arc,
    time::Duration,
};
use tracing::debug;

/// [`FileSocket`] that opens a Windows named pipe at the decoded path for reading and
/// writing.
///
/// Forward slashes in the decoded path are rewritten to backslashes before the open, so a
/// path smuggled as `//./pipe/docker_engine` reaches the OS as `\\.\pipe\docker_engine`.
/// When every instance of the pipe is busy, the connect loop waits with `WaitNamedPipeW`
/// bounded by the given timeout (unbounded when no timeout is given).
///
/// Both halves and the socket itself share one underlying handle; the handle is closed once
/// the socket and every half handed out for it are gone.
#[derive(Debug, Default)]
pub struct NamedPipeSocket {
    pipe: Option<Arc<FileHandle>>,
    closed: bool,
}

impl NamedPipeSocket {
    /// Creates an unconnected socket.
    pub fn new() -> Self { Self::default() }

    fn pipe(&self) -> io::Result<&Arc<FileHandle>> {
        self.pipe.as_ref().ok_or_else(|| ConnectErrorKind::NotConnected.into())
    }

    /// The receive side of the open pipe, sharing the socket's handle.
    pub fn recv_half(&self) -> io::Result<PipeRecvHalf> {
        Ok(PipeRecvHalf(Arc::clone(self.pipe()?)))
    }
    /// The send side of the open pipe, sharing the socket's handle.
    pub fn send_half(&self) -> io::Result<PipeSendHalf> {
        Ok(PipeSendHalf(Arc::clone(self.pipe()?)))
    }
}

impl FileSocket for NamedPipeSocket {
    fn connect(&mut self, addr: &ResolvedAddr, timeout: Option<Duration>) -> io::Result<()> {
        let path = addr.target_path()?.replace('/', "\\");
        debug!(%path, "connecting to named pipe");
        let timeout = timeout.filter(|t| !t.is_zero());
        let handle = c_wrappers::connect(&path, timeout)?;
        self.pipe = Some(Arc::new(handle));
        self.closed = false;
        Ok(())
    }

    fn is_connected(&self) -> bool { self.pipe.is_some() }
    fn is_closed(&self) -> bool { self.closed }

    fn close(&mut self) -> io::Result<()> {
        // Halves keep their shared handle alive; this only drops the socket's reference.
        self.pipe = None;
        self.closed = true;
        Ok(())
    }
}

impl Read for NamedPipeSocket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> { self.pipe()?.read(buf) }
}
impl Write for NamedPipeSocket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.pipe()?.write(buf) }
    fn flush(&mut self) -> io::Result<()> { self.pipe()?.flush() }
}

/// Receive side of a [`NamedPipeSocket`], sharing its handle.
#[derive(Clone, Debug)]
pub struct PipeRecvHalf(Arc<FileHandle>);
impl Read for PipeRecvHalf {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> { self.0.read(buf) }
}

/// Send side of a [`NamedPipeSocket`], sharing its handle.
#[derive(Clone, Debug)]
pub struct PipeSendHalf(Arc<FileHandle>);
impl Write for PipeSendHalf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.0.write(buf) }
    fn flush(&mut self) -> io::Result<()> { self.0.flush() }
}

/// [`SocketFactory`] producing [`NamedPipeSocket`]s.
#[derive(Copy, Clone, Debug, Default)]
pub struct NamedPipeSocketFactory;
impl SocketFactory for NamedPipeSocketFactory {
    type Socket = NamedPipeSocket;

    #[inline]
    fn create_socket(&self) -> NamedPipeSocket { NamedPipeSocket::new() }
}
