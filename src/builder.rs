//! Configuration for new buffers.

use crate::buffer::Buffer;
use crate::codec::{StandardCodec, TextCodec};
use crate::constants::{DEFAULT_ENDIAN, DEFAULT_PAGE_SIZE, MAX_LENGTH};
use crate::endian::Endian;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Initial contents of a built buffer.
#[derive(Debug, Clone)]
enum Contents {
    Zeroed(usize),
    Bytes(Vec<u8>),
}

/// A builder for constructing a [`Buffer`] with custom settings.
///
/// Every setting is optional; unset ones fall back to the values in
/// [`constants`](crate::constants) and [`StandardCodec`].
///
/// # Examples
///
/// ```
/// use dyn_byte_buf::{Buffer, Endian};
///
/// let mut buffer = Buffer::builder()
///     .page_size(256)
///     .endian(Endian::Little)
///     .bytes(b"\x01\x00")
///     .build()
///     .unwrap();
///
/// assert_eq!(buffer.capacity(), 256);
/// assert_eq!(buffer.read_u16().unwrap(), 1);
/// ```
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct BufferBuilder {
    page_size: Option<usize>,
    endian: Option<Endian>,
    codec: Option<Arc<dyn TextCodec>>,
    contents: Option<Contents>,
}

impl BufferBuilder {
    /// Creates a builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the growth granularity. Defaults to [`DEFAULT_PAGE_SIZE`].
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the byte order of the un-suffixed accessors. Defaults to [`DEFAULT_ENDIAN`].
    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = Some(endian);
        self
    }

    /// Sets the codec used by the text accessors.
    pub fn codec(self, codec: impl TextCodec + 'static) -> Self {
        self.shared_codec(Arc::new(codec))
    }

    /// Sets a codec that is already shared with other buffers.
    pub fn shared_codec(mut self, codec: Arc<dyn TextCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Starts the buffer with `length` zero bytes.
    ///
    /// Replaces any earlier call to [`bytes`](Self::bytes).
    pub fn length(mut self, length: usize) -> Self {
        self.contents = Some(Contents::Zeroed(length));
        self
    }

    /// Starts the buffer with a copy of `bytes`.
    ///
    /// Replaces any earlier call to [`length`](Self::length).
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.contents = Some(Contents::Bytes(bytes.to_vec()));
        self
    }

    /// Builds the [`Buffer`] with the configured settings.
    ///
    /// The cursor of the new buffer is at the start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageSize`] if the page size is zero or larger than [`MAX_LENGTH`],
    /// and [`Error::InvalidLength`] if the initial length is larger than [`MAX_LENGTH`].
    pub fn build(self) -> Result<Buffer> {
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page_size == 0 || page_size > MAX_LENGTH {
            tracing::debug!(page_size, "rejecting page size");
            return Err(Error::InvalidPageSize { page_size });
        }

        let endian = self.endian.unwrap_or(DEFAULT_ENDIAN);
        let codec = self.codec.unwrap_or_else(|| Arc::new(StandardCodec));

        match self.contents {
            None => Ok(Buffer::zeroed(0, page_size, endian, codec)),
            Some(Contents::Zeroed(length)) if length > MAX_LENGTH => {
                tracing::debug!(length, "rejecting initial length");
                Err(Error::InvalidLength {
                    length,
                    max: MAX_LENGTH,
                })
            }
            Some(Contents::Zeroed(length)) => Ok(Buffer::zeroed(length, page_size, endian, codec)),
            Some(Contents::Bytes(bytes)) => Ok(Buffer::from_parts(bytes, page_size, endian, codec)),
        }
    }
}
