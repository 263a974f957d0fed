//! Growable byte buffer with a read/write cursor.
//!
//! The [`Buffer`] type stages binary data for serialization code. Typed writes append (or
//! overwrite) at the cursor and grow the storage on demand; typed reads consume from the cursor and
//! fail instead of reading past the logical length.
//!
//! # Example
//!
//! ```
//! use dyn_byte_buf::{Buffer, Endian};
//!
//! let mut buffer = Buffer::new();
//!
//! buffer.write_u8(0xFA);
//! buffer.write_u16(0xCAFE); // big-endian by default
//! buffer.write_u32_with(7, Endian::Little);
//! buffer.write_str("hi").unwrap();
//!
//! assert_eq!(buffer.len(), 9);
//! assert_eq!(buffer.as_bytes(), [0xFA, 0xCA, 0xFE, 7, 0, 0, 0, b'h', b'i']);
//!
//! // Rewind and read back
//! buffer.set_offset(0).unwrap();
//! assert_eq!(buffer.read_u8().unwrap(), 0xFA);
//! assert_eq!(buffer.read_u16().unwrap(), 0xCAFE);
//! assert_eq!(buffer.read_u32_with(Endian::Little).unwrap(), 7);
//! assert_eq!(buffer.read_str(2).unwrap(), "hi");
//!
//! // Nothing left
//! assert!(buffer.read_u8().is_err());
//! ```

use crate::binary::{self, MAPPING};
use crate::builder::BufferBuilder;
use crate::capacity;
use crate::codec::{StandardCodec, TextCodec};
use crate::constants::{DEFAULT_ENCODING, DEFAULT_ENDIAN, DEFAULT_PAGE_SIZE, MAX_LENGTH};
use crate::endian::Endian;
use crate::error::{Error, Result};
use std::fmt::{self, Write as _};
use std::io;
use std::iter::FusedIterator;
use std::ops::{Bound, Range, RangeBounds};
use std::sync::Arc;
use std::{cmp, slice};

/// A growable byte buffer with a read/write cursor.
///
/// # Capacity Management
///
/// Storage is allocated in pages. Whenever a write or a length change needs more room, the buffer
/// asks [`capacity::plan`] for the new size: at least one page, rounded up to a whole number of
/// pages once more than one is needed. Capacity only ever grows, except through
/// [`clear()`](Self::clear), which goes back to the size planned at construction.
///
/// # Cursor
///
/// Reads and writes happen at the [`offset()`](Self::offset). Writes that run past the logical
/// length extend it; reads that would run past it fail with [`Error::ReadOverflow`] and leave the
/// cursor untouched.
///
/// # Byte order
///
/// Multi-byte accessors come in pairs: `write_u32`/`read_u32` use the buffer's default byte order
/// (big-endian unless configured), `write_u32_with`/`read_u32_with` take an explicit [`Endian`].
///
/// # Invariants
///
/// This buffer maintains the invariant `0 <= self.pos <= self.len <= self.buf.len()` at all times,
/// and `self.buf[self.len..]` is always zero.
#[derive(Clone)]
pub struct Buffer {
    /// Internal buffer storage, its length is the capacity.
    buf: Vec<u8>,
    /// Number of bytes considered written.
    len: usize,
    /// Read/write cursor.
    pos: usize,
    /// Growth granularity, never zero.
    page_size: usize,
    /// Capacity planned at construction, restored by `clear`.
    initial_cap: usize,
    /// Byte order for the un-suffixed accessors.
    endian: Endian,
    /// Converts between text and bytes for the text accessors.
    codec: Arc<dyn TextCodec>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates the default-order and explicit-order accessors for a multi-byte primitive.
macro_rules! typed_access {
    ($($ty:ident => $write:ident, $write_with:ident, $read:ident, $read_with:ident;)*) => {$(
        #[doc = concat!("Writes a `", stringify!($ty), "` at the cursor in the buffer's default byte order.")]
        ///
        /// Grows the buffer as needed, advances the cursor and extends the length if the cursor
        /// moves past it.
        ///
        /// # Panics
        ///
        /// Panics if the buffer would grow beyond [`MAX_LENGTH`] bytes.
        #[inline]
        pub fn $write(&mut self, value: $ty) {
            self.$write_with(value, self.endian);
        }

        #[doc = concat!("Writes a `", stringify!($ty), "` at the cursor in the given byte order.")]
        ///
        /// # Panics
        ///
        /// Panics if the buffer would grow beyond [`MAX_LENGTH`] bytes.
        #[inline]
        pub fn $write_with(&mut self, value: $ty, endian: Endian) {
            let bytes = match endian {
                Endian::Big => value.to_be_bytes(),
                Endian::Little => value.to_le_bytes(),
            };

            self.put(&bytes);
        }

        #[doc = concat!("Reads a `", stringify!($ty), "` at the cursor in the buffer's default byte order.")]
        ///
        /// # Errors
        ///
        /// Returns [`Error::ReadOverflow`] if the value would extend past the logical length.
        #[inline]
        pub fn $read(&mut self) -> Result<$ty> {
            self.$read_with(self.endian)
        }

        #[doc = concat!("Reads a `", stringify!($ty), "` at the cursor in the given byte order.")]
        ///
        /// # Errors
        ///
        /// Returns [`Error::ReadOverflow`] if the value would extend past the logical length.
        #[inline]
        pub fn $read_with(&mut self, endian: Endian) -> Result<$ty> {
            let bytes = self.take_array()?;

            Ok(match endian {
                Endian::Big => $ty::from_be_bytes(bytes),
                Endian::Little => $ty::from_le_bytes(bytes),
            })
        }
    )*};
}

impl Buffer {
    /// Creates a new empty buffer.
    ///
    /// The buffer starts with one page of [`DEFAULT_PAGE_SIZE`] bytes, big-endian accessors and the
    /// [`StandardCodec`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// # use dyn_byte_buf::constants::DEFAULT_PAGE_SIZE;
    /// let buffer = Buffer::new();
    /// assert_eq!(buffer.len(), 0);
    /// assert_eq!(buffer.capacity(), DEFAULT_PAGE_SIZE);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_page_size(0, DEFAULT_PAGE_SIZE)
    }

    /// Creates a buffer of `length` zero bytes with the cursor at the start.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let buffer = Buffer::with_length(10);
    /// assert_eq!(buffer.as_bytes(), [0; 10]);
    /// assert_eq!(buffer.offset(), 0);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `length` exceeds [`MAX_LENGTH`].
    #[inline]
    pub fn with_length(length: usize) -> Self {
        Self::with_page_size(length, DEFAULT_PAGE_SIZE)
    }

    /// Creates a buffer of `length` zero bytes growing in steps of `page_size`.
    ///
    /// A `page_size` of zero is treated as one. Use [`Buffer::builder`] to have it rejected
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let buffer = Buffer::with_page_size(100, 64);
    /// assert_eq!(buffer.len(), 100);
    /// assert_eq!(buffer.capacity(), 128);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `length` exceeds [`MAX_LENGTH`].
    pub fn with_page_size(length: usize, page_size: usize) -> Self {
        Self::zeroed(
            length,
            page_size,
            DEFAULT_ENDIAN,
            Arc::new(StandardCodec),
        )
    }

    /// Returns a [`BufferBuilder`] for configuring a new `Buffer`.
    #[inline]
    pub fn builder() -> BufferBuilder {
        BufferBuilder::new()
    }

    /// Creates a buffer of `length` zero bytes.
    pub(crate) fn zeroed(
        length: usize,
        page_size: usize,
        endian: Endian,
        codec: Arc<dyn TextCodec>,
    ) -> Self {
        let page_size = page_size.max(1);
        let cap = capacity::plan(length, page_size);

        Self {
            buf: vec![0; cap],
            len: length,
            pos: 0,
            page_size,
            initial_cap: cap,
            endian,
            codec,
        }
    }

    /// Creates a buffer holding `bytes`, reusing the allocation.
    pub(crate) fn from_parts(
        mut bytes: Vec<u8>,
        page_size: usize,
        endian: Endian,
        codec: Arc<dyn TextCodec>,
    ) -> Self {
        let page_size = page_size.max(1);
        let len = bytes.len();
        let cap = capacity::plan(len, page_size);

        bytes.resize(cap, 0);

        Self {
            buf: bytes,
            len,
            pos: 0,
            page_size,
            initial_cap: cap,
            endian,
            codec,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the current read/write position.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to `offset`.
    ///
    /// The next read or write starts at this position.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::{Buffer, Error};
    /// let mut buffer = Buffer::from(&b"abc"[..]);
    /// buffer.set_offset(3).unwrap(); // The end is a valid position
    ///
    /// assert_eq!(
    ///     buffer.set_offset(4),
    ///     Err(Error::OffsetOverflow { offset: 4, length: 3 })
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::OffsetOverflow`] if `offset` is greater than [`len()`](Self::len). The
    /// cursor is left unchanged.
    pub fn set_offset(&mut self, offset: usize) -> Result<()> {
        if offset > self.len {
            return Err(Error::OffsetOverflow {
                offset,
                length: self.len,
            });
        }

        self.pos = offset;

        Ok(())
    }

    /// Moves the cursor by `delta` bytes relative to its current position.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::{Buffer, Error};
    /// let mut buffer = Buffer::from(&b"abcdef"[..]);
    /// buffer.seek_relative(4).unwrap();
    /// buffer.seek_relative(-1).unwrap();
    /// assert_eq!(buffer.offset(), 3);
    ///
    /// assert_eq!(buffer.seek_relative(-4), Err(Error::InvalidOffset { offset: -1 }));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOffset`] if the target is negative and [`Error::OffsetOverflow`] if
    /// it is past the length. The cursor is left unchanged.
    pub fn seek_relative(&mut self, delta: isize) -> Result<()> {
        let delta = i128::try_from(delta).unwrap_or(i128::MAX);

        self.seek_to(Self::widen(self.pos).saturating_add(delta))
            .map(drop)
    }

    /// Moves the cursor to an absolute position computed in a wide signed type.
    fn seek_to(&mut self, target: i128) -> Result<usize> {
        match usize::try_from(target) {
            Ok(offset) => self.set_offset(offset).map(|()| offset),
            Err(_) if target < 0 => Err(Error::InvalidOffset { offset: target }),
            Err(_) => Err(Error::OffsetOverflow {
                offset: usize::MAX,
                length: self.len,
            }),
        }
    }

    fn widen(value: usize) -> i128 {
        // usize is at most 64 bits on every supported target
        i128::try_from(value).unwrap_or(i128::MAX)
    }

    /// Returns the number of bytes considered written.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no bytes.
    ///
    /// Equivalent to `self.len() == 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the logical length.
    ///
    /// - Growing exposes zero bytes, allocating pages as needed.
    /// - Shrinking discards the tail and zero-fills it, so growing again later exposes zeros
    ///   rather than the old data.
    ///
    /// The cursor is clamped to the new length. Capacity never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let mut buffer = Buffer::from(&b"Hello, World!"[..]);
    /// buffer.set_offset(7).unwrap();
    ///
    /// buffer.set_length(5).unwrap();
    /// assert_eq!(buffer.as_bytes(), b"Hello");
    /// assert_eq!(buffer.offset(), 5);
    ///
    /// buffer.set_length(7).unwrap();
    /// assert_eq!(buffer.as_bytes(), b"Hello\0\0");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `length` exceeds [`MAX_LENGTH`].
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    pub fn set_length(&mut self, length: usize) -> Result<()> {
        if length > MAX_LENGTH {
            return Err(Error::InvalidLength {
                length,
                max: MAX_LENGTH,
            });
        }

        match length.cmp(&self.len) {
            cmp::Ordering::Greater => {
                self.grow_to(length);

                // Already zero by invariant, but the exposed bytes are part of the contract
                self.buf[self.len..length].fill(0);
            }
            cmp::Ordering::Less => {
                tracing::trace!(from = self.len, to = length, "truncating buffer");

                self.buf[length..self.len].fill(0);
            }
            cmp::Ordering::Equal => {}
        }

        self.len = length;
        self.pos = cmp::min(self.pos, length);

        Ok(())
    }

    /// Returns the allocated size in bytes.
    ///
    /// This is always at least [`page_size()`](Self::page_size) and at least
    /// [`len()`](Self::len).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the growth granularity.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the byte order used by the un-suffixed accessors.
    #[inline]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Changes the byte order used by the un-suffixed accessors.
    #[inline]
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Returns the codec used by the text accessors.
    #[inline]
    pub fn codec(&self) -> &Arc<dyn TextCodec> {
        &self.codec
    }

    /// Returns the number of bytes between the cursor and the logical length.
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    #[inline]
    pub fn read_available(&self) -> usize {
        self.len - self.pos
    }

    /// Returns the number of bytes that can be written at the cursor without growing.
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    #[inline]
    pub fn bytes_available(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns the logical contents, `[0, len())`.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Returns a copy of the logical contents.
    #[inline]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Consumes the buffer, returning the logical contents.
    #[inline]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.len);
        self.buf
    }

    // -------------------------------------------------------------------------
    // Capacity
    // -------------------------------------------------------------------------

    /// Grows the storage so it can hold at least `target` bytes.
    ///
    /// If the capacity already suffices, no operation is performed.
    fn grow_to(&mut self, target: usize) {
        let next = capacity::plan(target, self.page_size);

        if next > self.buf.len() {
            tracing::trace!(
                from = self.buf.len(),
                to = next,
                page_size = self.page_size,
                "growing buffer"
            );

            self.buf.resize(next, 0);
        }
    }

    /// Resets the buffer to empty and releases any grown capacity.
    ///
    /// The cursor and length go to zero and the storage is reallocated at the size planned when
    /// the buffer was constructed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let mut buffer = Buffer::with_page_size(0, 16);
    /// buffer.write_bytes(&[1; 100]);
    /// assert_eq!(buffer.capacity(), 112);
    ///
    /// buffer.clear();
    /// assert_eq!(buffer.len(), 0);
    /// assert_eq!(buffer.offset(), 0);
    /// assert_eq!(buffer.capacity(), 16);
    /// ```
    pub fn clear(&mut self) {
        if self.buf.len() > self.initial_cap {
            tracing::trace!(
                from = self.buf.len(),
                to = self.initial_cap,
                "releasing grown capacity"
            );
        }

        self.pos = 0;
        self.len = 0;
        self.buf = vec![0; self.initial_cap];
    }

    // -------------------------------------------------------------------------
    // Raw access
    // -------------------------------------------------------------------------

    /// Returns where a write of `amt` bytes at the cursor would end.
    ///
    /// Writes are infallible like pushes onto a `Vec`, so running out of address space panics
    /// the same way.
    #[expect(clippy::panic, reason = "Mirrors Vec's capacity overflow")]
    fn write_end(&self, amt: usize) -> usize {
        match self.checked_write_end(amt) {
            Some(end) => end,
            None => panic!(
                "capacity overflow: cannot write {amt} bytes at offset {}",
                self.pos
            ),
        }
    }

    fn checked_write_end(&self, amt: usize) -> Option<usize> {
        self.pos.checked_add(amt).filter(|&end| end <= MAX_LENGTH)
    }

    /// Copies `src` to the cursor, growing as needed.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    fn put(&mut self, src: &[u8]) {
        if src.is_empty() {
            return;
        }

        let end = self.write_end(src.len());
        self.grow_to(end);

        self.buf[self.pos..end].copy_from_slice(src);

        self.pos = end;
        self.len = cmp::max(self.len, end);
    }

    /// Advances the cursor over `amt` bytes, returning the range they occupy.
    fn claim(&mut self, amt: usize) -> Result<Range<usize>> {
        let Some(end) = self.pos.checked_add(amt) else {
            return Err(Error::InvalidReadLength {
                offset: self.pos,
                requested: amt,
            });
        };

        if end > self.len {
            return Err(Error::ReadOverflow {
                offset: self.pos,
                requested: amt,
                length: self.len,
            });
        }

        let range = self.pos..end;
        self.pos = end;

        Ok(range)
    }

    #[expect(clippy::indexing_slicing, reason = "Range checked by claim")]
    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let range = self.claim(N)?;

        let mut bytes = [0; N];
        bytes.copy_from_slice(&self.buf[range]);

        Ok(bytes)
    }

    // -------------------------------------------------------------------------
    // Typed writes and reads
    // -------------------------------------------------------------------------

    /// Writes an `i8` at the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would grow beyond [`MAX_LENGTH`] bytes.
    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.put(&value.to_be_bytes());
    }

    /// Writes a `u8` at the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would grow beyond [`MAX_LENGTH`] bytes.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.put(&[value]);
    }

    /// Writes a boolean as a single byte, `1` for `true` and `0` for `false`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would grow beyond [`MAX_LENGTH`] bytes.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Reads an `i8` at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOverflow`] if the cursor is at the end.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.take_array().map(i8::from_be_bytes)
    }

    /// Reads a `u8` at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOverflow`] if the cursor is at the end.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.take_array::<1>().map(|[byte]| byte)
    }

    /// Reads a byte at the cursor as a boolean, any non-zero value is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOverflow`] if the cursor is at the end.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_u8().map(|byte| byte != 0)
    }

    typed_access! {
        i16 => write_i16, write_i16_with, read_i16, read_i16_with;
        u16 => write_u16, write_u16_with, read_u16, read_u16_with;
        i32 => write_i32, write_i32_with, read_i32, read_i32_with;
        u32 => write_u32, write_u32_with, read_u32, read_u32_with;
        i64 => write_i64, write_i64_with, read_i64, read_i64_with;
        u64 => write_u64, write_u64_with, read_u64, read_u64_with;
        f32 => write_f32, write_f32_with, read_f32, read_f32_with;
        f64 => write_f64, write_f64_with, read_f64, read_f64_with;
    }

    // -------------------------------------------------------------------------
    // Byte and text writes and reads
    // -------------------------------------------------------------------------

    /// Writes `bytes` at the cursor, growing as needed.
    ///
    /// Writing an empty slice is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would grow beyond [`MAX_LENGTH`] bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    /// Writes the `range` subrange of `bytes` at the cursor.
    ///
    /// The range is clamped to `bytes`, and a range that ends up empty is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.write_bytes_range(b"Hello, World!", 7..);
    /// buffer.write_bytes_range(b"abc", 2..100);
    /// buffer.write_bytes_range(b"abc", 3..1);
    /// assert_eq!(buffer.as_bytes(), b"World!c");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the buffer would grow beyond [`MAX_LENGTH`] bytes.
    #[expect(clippy::indexing_slicing, reason = "Range clamped to the source")]
    pub fn write_bytes_range(&mut self, bytes: &[u8], range: impl RangeBounds<usize>) {
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => bytes.len(),
        }
        .min(bytes.len());

        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(end);

        self.put(&bytes[start..end]);
    }

    /// Writes `text` encoded as [`DEFAULT_ENCODING`] (UTF-8).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] if the buffer's codec does not handle UTF-8.
    #[inline]
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.write_text(text, DEFAULT_ENCODING)
    }

    /// Writes `text` encoded under `encoding` by the buffer's codec.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.write_text("hi", "UTF-16BE").unwrap();
    /// assert_eq!(buffer.as_bytes(), [0, b'h', 0, b'i']);
    ///
    /// assert!(buffer.write_text("hi", "EBCDIC").is_err());
    /// assert_eq!(buffer.len(), 4);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] if the codec does not recognise `encoding`. Nothing
    /// is written in that case.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would grow beyond [`MAX_LENGTH`] bytes.
    pub fn write_text(&mut self, text: &str, encoding: &str) -> Result<()> {
        let bytes = self.codec.encode(text, encoding)?;
        self.put(&bytes);

        Ok(())
    }

    /// Reads `length` bytes at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReadLength`] if `length` can't be addressed from the cursor, and
    /// [`Error::ReadOverflow`] if the read would extend past the logical length. The cursor is
    /// left unchanged on error.
    #[expect(clippy::indexing_slicing, reason = "Range checked by claim")]
    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        let range = self.claim(length)?;

        Ok(self.buf[range].to_vec())
    }

    /// Reads `length` bytes at the cursor and decodes them as [`DEFAULT_ENCODING`] (UTF-8).
    ///
    /// # Errors
    ///
    /// See [`read_text`](Self::read_text).
    #[inline]
    pub fn read_str(&mut self, length: usize) -> Result<String> {
        self.read_text(length, DEFAULT_ENCODING)
    }

    /// Reads `length` bytes at the cursor and decodes them under `encoding`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let mut buffer = Buffer::from(&[0x3D, 0xD8, 0x00, 0xDE][..]);
    /// assert_eq!(buffer.read_text(4, "utf-16").unwrap(), "😀");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] if the codec does not recognise `encoding`, plus the
    /// errors of [`read_bytes`](Self::read_bytes). The cursor is left unchanged on error.
    #[expect(clippy::indexing_slicing, reason = "Range checked by claim")]
    pub fn read_text(&mut self, length: usize, encoding: &str) -> Result<String> {
        if !self.codec.supports(encoding) {
            return Err(Error::unsupported_encoding(encoding));
        }

        let start = self.pos;
        let range = self.claim(length)?;

        self.codec
            .decode(&self.buf[range], encoding)
            .inspect_err(|_| self.pos = start)
    }

    // -------------------------------------------------------------------------
    // Auxiliary operations
    // -------------------------------------------------------------------------

    /// Copies `range` into a new, independent buffer.
    ///
    /// Indices follow slice conventions from JavaScript: negative values count back from the end
    /// and anything out of range is clamped. An inverted range gives an empty buffer. The copy
    /// shares the page size, byte order and codec, and its cursor is at the start.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let buffer = Buffer::from(&b"Hello, World!"[..]);
    ///
    /// assert_eq!(buffer.slice(..5).as_bytes(), b"Hello");
    /// assert_eq!(buffer.slice(-6..).as_bytes(), b"World!");
    /// assert_eq!(buffer.slice(-6..-1).as_bytes(), b"World");
    /// assert_eq!(buffer.slice(7..100).as_bytes(), b"World!");
    /// assert!(buffer.slice(5..2).is_empty());
    /// ```
    #[expect(clippy::indexing_slicing, reason = "Range resolved within the length")]
    pub fn slice(&self, range: impl RangeBounds<isize>) -> Self {
        let range = resolve_range(&range, self.len);

        Self::from_parts(
            self.buf[range].to_vec(),
            self.page_size,
            self.endian,
            Arc::clone(&self.codec),
        )
    }

    /// Copies `range` over the bytes starting at `target`, within the logical contents.
    ///
    /// Behaves like `memmove`: overlapping regions copy as if the source were read in full first.
    /// Indices resolve like [`slice`](Self::slice), and the copy is cut short at the end of the
    /// buffer. Neither the length nor the cursor changes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let mut buffer = Buffer::from(&[1, 2, 3, 4, 5][..]);
    /// buffer.copy_within(0, 3..5);
    /// assert_eq!(buffer.as_bytes(), [4, 5, 3, 4, 5]);
    ///
    /// buffer.copy_within(-2, ..);
    /// assert_eq!(buffer.as_bytes(), [4, 5, 3, 4, 5]);
    /// ```
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    pub fn copy_within(&mut self, target: isize, range: impl RangeBounds<isize>) {
        let Range { start, end } = resolve_range(&range, self.len);
        let target = resolve_index(target, self.len);

        // Both terms are bounded by `len`
        let count = cmp::min(end - start, self.len - target);

        if count > 0 {
            self.buf.copy_within(start..start + count, target);
        }
    }

    /// Returns the contents as a binary string, one character per byte.
    ///
    /// See [`binary`] for the mapping. The same string is produced by the [`Display`](fmt::Display)
    /// implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let buffer = Buffer::from(&[b'o', b'k', 0xE9][..]);
    /// assert_eq!(buffer.to_binary_string(), "ok\u{E9}");
    /// ```
    #[inline]
    pub fn to_binary_string(&self) -> String {
        binary::to_binary_string(self.as_bytes())
    }

    /// Returns an iterator over the logical contents.
    ///
    /// Pair it with [`Iterator::enumerate`] for `(index, byte)` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Buffer;
    /// let buffer = Buffer::from(&b"ab"[..]);
    ///
    /// let entries: Vec<_> = buffer.iter().enumerate().collect();
    /// assert_eq!(entries, [(0, b'a'), (1, b'b')]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.as_bytes().iter(),
        }
    }
}

/// Resolves a possibly negative index against `len`, clamping to `0..=len`.
fn resolve_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        cmp::min(index.unsigned_abs(), len)
    }
}

/// Resolves the index just after `index`, where `-1` means the end.
fn resolve_after(index: isize, len: usize) -> usize {
    match index.checked_add(1) {
        Some(0) | None => len,
        Some(next) => resolve_index(next, len),
    }
}

fn resolve_range(range: &impl RangeBounds<isize>, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&start) => resolve_index(start, len),
        Bound::Excluded(&start) => resolve_after(start, len),
        Bound::Unbounded => 0,
    };

    let end = match range.end_bound() {
        Bound::Included(&end) => resolve_after(end, len),
        Bound::Excluded(&end) => resolve_index(end, len),
        Bound::Unbounded => len,
    };

    start..cmp::max(start, end)
}

/// Iterator over the bytes of a [`Buffer`].
///
/// Created by [`Buffer::iter`]. Restart by calling `iter()` again.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, u8>,
}

impl Iterator for Iter<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.inner.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<u8> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Buffer {
    type Item = u8;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len)
            .field("pos", &self.pos)
            .field("cap", &self.buf.len())
            .field("page_size", &self.page_size)
            .field("endian", &self.endian)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

/// Writes the binary string form, see [`Buffer::to_binary_string`].
impl fmt::Display for Buffer {
    #[expect(clippy::indexing_slicing, reason = "Every u8 indexes the table")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_bytes()
            .iter()
            .try_for_each(|&b| f.write_char(MAPPING[usize::from(b)]))
    }
}

/// Buffers are equal when their logical contents are; cursor and configuration are ignored.
impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Buffer {}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_parts(
            bytes,
            DEFAULT_PAGE_SIZE,
            DEFAULT_ENDIAN,
            Arc::new(StandardCodec),
        )
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl Extend<u8> for Buffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            self.write_u8(byte);
        }
    }
}

impl<'a> Extend<&'a u8> for Buffer {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

/// Reads from the cursor, returning `Ok(0)` once it reaches the end.
impl io::Read for Buffer {
    #[expect(clippy::indexing_slicing, reason = "Range checked by claim")]
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let amt = cmp::min(dst.len(), self.read_available());
        let range = self.claim(amt)?;

        dst[..amt].copy_from_slice(&self.buf[range]);

        Ok(amt)
    }
}

/// Writes at the cursor, growing as needed.
impl io::Write for Buffer {
    fn write(&mut self, src: &[u8]) -> io::Result<usize> {
        if self.checked_write_end(src.len()).is_none() {
            return Err(Error::InvalidLength {
                length: self.pos.saturating_add(src.len()),
                max: MAX_LENGTH,
            }
            .into());
        }

        self.put(src);

        Ok(src.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Moves the cursor. Seeking past the length is an error rather than a hole, because the cursor
/// never leaves `0..=len()`.
impl io::Seek for Buffer {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let target = match pos {
            io::SeekFrom::Start(offset) => i128::from(offset),
            io::SeekFrom::End(delta) => Self::widen(self.len).saturating_add(i128::from(delta)),
            io::SeekFrom::Current(delta) => {
                Self::widen(self.pos).saturating_add(i128::from(delta))
            }
        };

        let offset = self.seek_to(target)?;

        Ok(offset as u64)
    }
}
