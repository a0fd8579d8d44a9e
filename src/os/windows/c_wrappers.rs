use super::file_handle::FileHandle;
use std::{
    io,
    os::windows::prelude::*,
    ptr,
    time::{Duration, Instant},
};
use widestring::{U16CStr, U16CString};
use windows_sys::Win32::{
    Foundation::{
        ERROR_PIPE_BUSY, ERROR_SEM_TIMEOUT, GENERIC_READ, GENERIC_WRITE, INVALID_HANDLE_VALUE,
    },
    Storage::FileSystem::{CreateFileW, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING},
    System::Pipes::{WaitNamedPipeW, NMPWAIT_WAIT_FOREVER},
};

#[cold]
fn timed_out() -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, "named pipe connection attempt timed out")
}

/// Opens a read/write handle to the pipe at `path`, waiting out busy instances with
/// `WaitNamedPipeW` for at most `timeout` (or indefinitely given `None`).
pub(super) fn connect(path: &str, timeout: Option<Duration>) -> io::Result<FileHandle> {
    let wide =
        U16CString::from_str(path).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let deadline = timeout.map(|t| Instant::now() + t);
    loop {
        match open(&wide) {
            Err(e) if e.raw_os_error() == Some(ERROR_PIPE_BUSY as i32) => {
                block_for_server(&wide, deadline)?;
            }
            els => return els,
        }
    }
}

fn open(path: &U16CStr) -> io::Result<FileHandle> {
    let handle = unsafe {
        CreateFileW(
            path.as_ptr(),
            GENERIC_READ | GENERIC_WRITE,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            ptr::null(),
            OPEN_EXISTING,
            0,
            0,
        )
    };
    if handle == INVALID_HANDLE_VALUE {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: we just created this handle
    Ok(unsafe { OwnedHandle::from_raw_handle(handle as RawHandle) }.into())
}

fn block_for_server(path: &U16CStr, deadline: Option<Instant>) -> io::Result<()> {
    let millis = match deadline {
        Some(deadline) => {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(timed_out());
            }
            u32::try_from(remaining.as_millis()).unwrap_or(NMPWAIT_WAIT_FOREVER - 1).max(1)
        }
        None => NMPWAIT_WAIT_FOREVER,
    };
    let ok = unsafe { WaitNamedPipeW(path.as_ptr(), millis) } != 0;
    if ok {
        return Ok(());
    }
    let e = io::Error::last_os_error();
    if e.raw_os_error() == Some(ERROR_SEM_TIMEOUT as i32) {
        return Err(timed_out());
    }
    Err(e)
}
