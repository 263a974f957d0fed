//! Error types for buffer operations.
//!
//! Every failure in this crate is synchronous, local and non-retryable. They signal caller misuse
//! (out-of-bounds access, bad configuration, an unknown encoding name) rather than transient
//! conditions, so the variants carry enough context to locate the faulty call.

use std::io;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by [`Buffer`](crate::Buffer) and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The cursor would move to a negative position.
    #[error("invalid buffer offset: {offset}")]
    InvalidOffset {
        /// The resolved position.
        offset: i128,
    },

    /// The cursor would move past the logical length.
    #[error("offset {offset} is outside the bounds of the buffer (length {length})")]
    OffsetOverflow {
        /// The requested position.
        offset: usize,
        /// Logical length at the time of the call.
        length: usize,
    },

    /// A logical length larger than the buffer can hold.
    #[error("invalid buffer length: {length} exceeds maximum {max}")]
    InvalidLength {
        /// The requested length.
        length: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// A read would consume bytes beyond the logical length.
    #[error("read of {requested} bytes at offset {offset} is outside the bounds of the buffer (length {length})")]
    ReadOverflow {
        /// Cursor position at the time of the read.
        offset: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Logical length at the time of the read.
        length: usize,
    },

    /// A read length that cannot be addressed from the current cursor.
    #[error("invalid read length: {requested} bytes at offset {offset}")]
    InvalidReadLength {
        /// Cursor position at the time of the read.
        offset: usize,
        /// Number of bytes requested.
        requested: usize,
    },

    /// The text codec does not recognise the encoding name.
    #[error("unsupported encoding {encoding}")]
    UnsupportedEncoding {
        /// The name as given by the caller.
        encoding: String,
    },

    /// The host byte order is neither big nor little endian.
    #[error("unknown endianness")]
    UnknownEndianness,

    /// A page size of zero, or one larger than the maximum length.
    #[error("invalid page size: {page_size}")]
    InvalidPageSize {
        /// The rejected page size.
        page_size: usize,
    },
}

impl Error {
    /// Shorthand for [`Error::UnsupportedEncoding`].
    pub fn unsupported_encoding(encoding: impl Into<String>) -> Self {
        Self::UnsupportedEncoding {
            encoding: encoding.into(),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::ReadOverflow { .. } => io::ErrorKind::UnexpectedEof,
            Error::UnknownEndianness => io::ErrorKind::Unsupported,
            Error::InvalidOffset { .. }
            | Error::OffsetOverflow { .. }
            | Error::InvalidLength { .. }
            | Error::InvalidReadLength { .. }
            | Error::UnsupportedEncoding { .. }
            | Error::InvalidPageSize { .. } => io::ErrorKind::InvalidInput,
        };

        io::Error::new(kind, err)
    }
}
