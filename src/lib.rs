//! A growable byte buffer with a read/write cursor, for staging binary data.
//!
//! [`Vec<u8>`] grows, and [`std::io::Cursor`] tracks a position, but serialization code usually
//! wants both plus typed access in a chosen byte order. [`Buffer`] combines them: writes at the
//! cursor grow the storage page by page, reads at the cursor are bounds checked against the
//! logical length, and text goes through a pluggable [`TextCodec`].
//!
//! # Quick start
//!
//! ```
//! use dyn_byte_buf::{Buffer, Endian};
//!
//! let mut buffer = Buffer::new();
//!
//! buffer.write_i8(-81);
//! buffer.write_bool(true);
//! buffer.write_i16(-1284); // big-endian unless configured
//! buffer.write_f64_with(0.5, Endian::Little);
//! buffer.write_text("héllo", "UTF-16").unwrap();
//!
//! buffer.set_offset(0).unwrap();
//!
//! assert_eq!(buffer.read_i8().unwrap(), -81);
//! assert!(buffer.read_bool().unwrap());
//! assert_eq!(buffer.read_i16().unwrap(), -1284);
//! assert_eq!(buffer.read_f64_with(Endian::Little).unwrap(), 0.5);
//! assert_eq!(buffer.read_text(10, "UTF-16").unwrap(), "héllo");
//! ```
//!
//! # Configuration
//!
//! ```
//! use dyn_byte_buf::{Buffer, Endian};
//!
//! let buffer = Buffer::builder()
//!     .page_size(1024)           // grow in 1 KiB steps
//!     .endian(Endian::Little)    // un-suffixed accessors are little-endian
//!     .length(16)                // start with 16 zero bytes
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(buffer.capacity(), 1024);
//! ```
//!
//! # Crate organisation
//!
//! - [`Buffer`]: the primary type.
//! - [`BufferBuilder`]: configures page size, byte order, codec and initial contents.
//! - [`capacity`]: the growth rule.
//! - [`codec`]: [`TextCodec`], the default [`StandardCodec`] and the [`Encoding`]s it knows.
//! - [`binary`]: the one character per byte string view used by [`Buffer::to_binary_string`].
//! - [`Endian`]: byte order selection and host detection.
//! - [`constants`]: default page size, encoding and byte order.
//! - [`Error`]: everything that can go wrong.
//!
//! # Logging
//!
//! Capacity growth, truncation and releases are reported as `trace` events through [`tracing`].
//! Install a subscriber to see them.

pub mod binary;
pub mod buffer;
mod builder;
pub mod capacity;
pub mod codec;
pub mod constants;
mod endian;
mod error;

pub use buffer::{Buffer, Iter};
pub use builder::BufferBuilder;
pub use codec::{Encoding, StandardCodec, TextCodec};
pub use endian::Endian;
pub use error::{Error, Result};
