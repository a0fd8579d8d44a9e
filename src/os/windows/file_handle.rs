use std::{io, os::windows::prelude::*, ptr};
use windows_sys::Win32::{
    Foundation::{ERROR_BROKEN_PIPE, HANDLE},
    Storage::FileSystem::{FlushFileBuffers, ReadFile, WriteFile},
};

/// Newtype wrapper which defines file I/O operations on a handle to a file.
#[repr(transparent)]
#[derive(Debug)]
pub(super) struct FileHandle(OwnedHandle);

impl FileHandle {
    fn as_int_handle(&self) -> HANDLE { self.0.as_raw_handle() as HANDLE }

    pub fn read(&self, buf: &mut [u8]) -> io::Result<usize> {
        let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut bytes_read: u32 = 0;
        let ok = unsafe {
            ReadFile(
                self.as_int_handle(),
                buf.as_mut_ptr().cast(),
                len,
                &mut bytes_read,
                ptr::null_mut(),
            )
        } != 0;
        if ok {
            return Ok(bytes_read as usize);
        }
        let e = io::Error::last_os_error();
        // The far side hanging up is EOF, not an error.
        if e.raw_os_error() == Some(ERROR_BROKEN_PIPE as i32) {
            return Ok(0);
        }
        Err(e)
    }

    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut bytes_written: u32 = 0;
        let ok = unsafe {
            WriteFile(
                self.as_int_handle(),
                buf.as_ptr().cast(),
                len,
                &mut bytes_written,
                ptr::null_mut(),
            )
        } != 0;
        if ok {
            Ok(bytes_written as usize)
        } else {
            Err(io::Error::last_os_error())
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        let ok = unsafe { FlushFileBuffers(self.as_int_handle()) } != 0;
        if ok {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

impl From<OwnedHandle> for FileHandle {
    fn from(handle: OwnedHandle) -> Self { Self(handle) }
}
impl AsHandle for FileHandle {
    fn as_handle(&self) -> BorrowedHandle<'_> { self.0.as_handle() }
}
