#![doc = include_str!("../README.md")]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]
#![warn(
    missing_docs,
    clippy::panic_in_result_fn,
    clippy::missing_assert_message,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

pub mod error;
pub mod hostname;
pub mod probe;
pub mod resolve;
pub mod socket;

/// Platform-specific socket implementations.
///
/// This module houses two modules: `unix` and `windows`, although only one at a time will be
/// visible, depending on which platform the documentation was built on. Which one a program
/// should use is a startup-time decision; see [`probe`](crate::probe).
pub mod os {
    #[cfg(unix)]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(unix)))]
    pub mod unix;
    #[cfg(windows)]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(windows)))]
    pub mod windows;
}

pub use {
    hostname::SOCKET_MARKER,
    resolve::ResolvedAddr,
    socket::{FileSocket, SocketFactory},
};

#[cfg(unix)]
pub use os::unix::{UnixSocket, UnixSocketFactory};
#[cfg(windows)]
pub use os::windows::{NamedPipeSocket, NamedPipeSocketFactory};

#[cfg(test)]
#[path = "../tests/index.rs"]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests;
