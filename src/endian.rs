//! Byte order selection.

use crate::error::{Error, Result};

/// Byte order of a multi-byte value in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Most significant byte first (network order).
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl Endian {
    /// Detects the byte order of the host at runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::Endian;
    /// let native = Endian::native().unwrap();
    /// assert_eq!(native, if cfg!(target_endian = "little") { Endian::Little } else { Endian::Big });
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEndianness`] if a probe value reads back in neither order.
    pub fn native() -> Result<Self> {
        let probe = 0x0102_u16.to_ne_bytes();

        match probe {
            [0x01, 0x02] => Ok(Self::Big),
            [0x02, 0x01] => Ok(Self::Little),
            _ => Err(Error::UnknownEndianness),
        }
    }

    /// Returns `true` for [`Endian::Little`].
    #[inline]
    pub const fn is_little(self) -> bool {
        matches!(self, Self::Little)
    }
}
