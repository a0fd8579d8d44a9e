//! Startup-time check for whether the Unix-socket strategy is usable on the current host.
//!
//! A higher layer queries this once and injects the matching factory (`UnixSocketFactory`
//! where supported, `NamedPipeSocketFactory` otherwise); the probe itself never fails.

use tracing::info;

/// Whether the Unix-socket strategy is usable on an OS with the given name.
///
/// Any name containing `windows` (case-insensitively) is unsupported outright. Everything
/// else is subject to a runtime capability check; a failing check is logged and reported as
/// unsupported, never propagated.
pub fn is_supported(os_name: &str) -> bool {
    if os_name.to_lowercase().contains("windows") {
        return false;
    }
    match capability_check() {
        Ok(()) => true,
        Err(e) => {
            info!(error = %e, "Unix domain sockets not supported on this host");
            false
        }
    }
}

/// [`is_supported`] for the OS the process is running on.
pub fn is_supported_here() -> bool { is_supported(std::env::consts::OS) }

#[cfg(unix)]
fn capability_check() -> std::io::Result<()> {
    std::os::unix::net::UnixStream::pair().map(drop)
}
#[cfg(not(unix))]
fn capability_check() -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "Unix domain sockets are not available on this platform",
    ))
}
