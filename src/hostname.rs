//! The reversible mapping between filesystem paths and hostname-shaped strings.
//!
//! A path is hex-encoded (lowercase) and, if the result is too long for a single DNS label,
//! split into dot-separated segments of at most [`MAX_LABEL_LENGTH`] characters. The cuts are
//! pure character-count cuts on the hex string: hex digits are ASCII, so a cut can never land
//! inside a multi-byte character of the original path. Appending [`SOCKET_MARKER`] yields the
//! outward-facing hostname that [`resolve::lookup`](crate::resolve::lookup) recognizes.

use std::{borrow::Cow, io};

/// Reserved hostname suffix flagging a tunneled path.
pub const SOCKET_MARKER: &str = ".socket";

/// Maximum length of a single DNS hostname label.
pub const MAX_LABEL_LENGTH: usize = 63;
/// Upper bound on the length of the unsplit hex string.
///
/// Anything at or above this cannot be split into four labels and is rejected by
/// [`encode`] up front, which bounds accepted paths to 125 bytes of UTF-8.
pub const MAX_HOSTNAME_LENGTH: usize = MAX_LABEL_LENGTH * 4;

#[cold]
fn path_too_long() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        "path too long to encode into a hostname (at most 125 bytes of UTF-8)",
    )
}

#[cold]
fn no_marker() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, "hostname does not carry the socket marker")
}

fn invalid_data(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Hex-encodes a path, splitting the result into dot-separated labels if it exceeds a single
/// label's capacity.
///
/// # Errors
/// If the hex form of the path is [too long](MAX_HOSTNAME_LENGTH) to fit into a hostname.
pub fn encode(path: &str) -> io::Result<String> {
    let encoded = hex::encode(path);
    if encoded.len() >= MAX_HOSTNAME_LENGTH {
        return Err(path_too_long());
    }
    if encoded.len() <= MAX_LABEL_LENGTH {
        return Ok(encoded);
    }
    let mut labels = Vec::with_capacity(encoded.len().div_ceil(MAX_LABEL_LENGTH));
    let mut rest = encoded.as_str();
    while rest.len() > MAX_LABEL_LENGTH {
        let (label, tail) = rest.split_at(MAX_LABEL_LENGTH);
        labels.push(label);
        rest = tail;
    }
    labels.push(rest);
    Ok(labels.join("."))
}

/// Recovers the path from the output of [`encode`], dotted or not.
///
/// This is the exact inverse of [`encode`] for every input it accepts.
///
/// # Errors
/// If the label is not well-formed hex or does not decode to UTF-8. Both surface as
/// [`InvalidData`](io::ErrorKind::InvalidData).
pub fn decode(label: &str) -> io::Result<String> {
    let unsplit: Cow<'_, str> = if label.contains('.') {
        Cow::Owned(label.split('.').collect())
    } else {
        Cow::Borrowed(label)
    };
    let bytes = hex::decode(unsplit.as_bytes()).map_err(invalid_data)?;
    String::from_utf8(bytes).map_err(invalid_data)
}

/// Builds the outward-facing hostname for a path: [`encode`]`(path)` + [`SOCKET_MARKER`].
pub fn encode_hostname(path: &str) -> io::Result<String> {
    let mut hostname = encode(path)?;
    hostname.push_str(SOCKET_MARKER);
    Ok(hostname)
}

/// Recovers the path from a marker-suffixed hostname.
///
/// Everything from the first occurrence of [`SOCKET_MARKER`] onward is stripped and the
/// remainder is [`decode`]d.
///
/// # Errors
/// [`InvalidInput`](io::ErrorKind::InvalidInput) if the hostname carries no marker, plus
/// everything [`decode`] can return.
pub fn decode_hostname(hostname: &str) -> io::Result<String> {
    let (label, _) = hostname.split_once(SOCKET_MARKER).ok_or_else(no_marker)?;
    decode(label)
}
