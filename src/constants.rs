//! Default configuration values shared across the crate.
//!
//! Every [`Buffer`](crate::Buffer) starts from these values unless a
//! [`BufferBuilder`](crate::BufferBuilder) overrides them.
//!
//! # Invariant
//!
//! The following relationships must hold between the constants:
//!
//! - `DEFAULT_PAGE_SIZE` is a power of 2 and a multiple of 1 KiB (1024 bytes)
//! - `MAX_LENGTH > DEFAULT_PAGE_SIZE`
//! - `DEFAULT_ENCODING` is recognised by [`StandardCodec`](crate::codec::StandardCodec)

use crate::endian::Endian;

/// Default growth granularity (4 KiB).
///
/// Matches the most common virtual memory page size. A buffer's capacity is always at least one
/// page and, once it holds more than one page of data, a whole number of pages.
pub const DEFAULT_PAGE_SIZE: usize =
    // 2^12 = 4096 = 4 * 1024 = 4 KiB
    1 << 12;

/// Largest logical length a buffer accepts.
///
/// This is the allocation limit of [`Vec`], not a recommended size. It's used to reject
/// unreasonable lengths with an error instead of letting the allocator abort.
pub const MAX_LENGTH: usize = isize::MAX.unsigned_abs();

/// Encoding used by [`Buffer::write_str`](crate::Buffer::write_str) and
/// [`Buffer::read_str`](crate::Buffer::read_str).
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Byte order used by the un-suffixed typed accessors when none is configured.
///
/// Big-endian (network order), so buffers built for wire protocols need no configuration.
pub const DEFAULT_ENDIAN: Endian = Endian::Big;
