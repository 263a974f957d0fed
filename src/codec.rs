//! Text encoding and decoding for the buffer's text path.
//!
//! [`Buffer::write_text`](crate::Buffer::write_text) and
//! [`Buffer::read_text`](crate::Buffer::read_text) don't convert text themselves. They hand the
//! text (or bytes) and the caller's encoding name to a [`TextCodec`], which a buffer receives at
//! construction. [`StandardCodec`] is used unless a [`BufferBuilder`](crate::BufferBuilder) says
//! otherwise.
//!
//! # Recognised names
//!
//! [`StandardCodec`] resolves names through [`Encoding`]'s [`FromStr`] implementation, which is
//! case-insensitive:
//!
//! | Names | Encoding |
//! | --- | --- |
//! | `utf8`, `utf-8` | [`Encoding::Utf8`] |
//! | `utf16`, `utf-16`, `utf16le`, `utf-16le` | [`Encoding::Utf16Le`] |
//! | `utf16be`, `utf-16be` | [`Encoding::Utf16Be`] |
//! | `utf32`, `utf-32`, `utf32le`, `utf-32le` | [`Encoding::Utf32Le`] |
//! | `utf32be`, `utf-32be` | [`Encoding::Utf32Be`] |
//! | `ascii`, `us-ascii` | [`Encoding::Ascii`] |
//! | `latin1`, `iso-8859-1` | [`Encoding::Latin1`] |
//!
//! The un-suffixed UTF-16 and UTF-32 names are little-endian. No byte order mark is written, and
//! none is stripped on decode.
//!
//! # Lossy decoding
//!
//! Decoding never fails on content. Malformed input (invalid UTF-8, unpaired surrogates, code
//! units cut short at the end, values that are not Unicode scalars, non-ASCII bytes under ASCII)
//! decodes to U+FFFD. Only an unrecognised encoding name is an error.

use crate::error::{Error, Result};
use std::char::REPLACEMENT_CHARACTER;
use std::fmt;
use std::str::FromStr;

/// Converts between text and bytes under a named encoding.
///
/// Implementations must reject unknown names with [`Error::UnsupportedEncoding`] on both paths.
pub trait TextCodec: fmt::Debug + Send + Sync {
    /// Encodes `text` under `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] if `encoding` is not recognised.
    fn encode(&self, text: &str, encoding: &str) -> Result<Vec<u8>>;

    /// Decodes `bytes` under `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedEncoding`] if `encoding` is not recognised.
    fn decode(&self, bytes: &[u8], encoding: &str) -> Result<String>;

    /// Returns `true` if `encoding` is recognised.
    ///
    /// The buffer checks this before consuming bytes for a text read, so a bad name leaves the
    /// cursor where it was.
    fn supports(&self, encoding: &str) -> bool {
        self.decode(&[], encoding).is_ok()
    }
}

/// A text encoding understood by [`StandardCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8.
    Utf8,
    /// UTF-16, little-endian code units.
    Utf16Le,
    /// UTF-16, big-endian code units.
    Utf16Be,
    /// UTF-32, little-endian code units.
    Utf32Le,
    /// UTF-32, big-endian code units.
    Utf32Be,
    /// 7-bit ASCII. Characters outside the range encode as `?`.
    Ascii,
    /// ISO-8859-1. Characters above U+00FF encode as `?`.
    Latin1,
}

impl Encoding {
    /// Canonical name of the encoding.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf32Le => "UTF-32LE",
            Self::Utf32Be => "UTF-32BE",
            Self::Ascii => "ASCII",
            Self::Latin1 => "Latin1",
        }
    }

    /// Encodes `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::codec::Encoding;
    /// assert_eq!(Encoding::Utf16Be.encode("A"), [0x00, 0x41]);
    /// assert_eq!(Encoding::Ascii.encode("é!"), b"?!");
    /// ```
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Utf32Le => text.chars().map(u32::from).flat_map(u32::to_le_bytes).collect(),
            Self::Utf32Be => text.chars().map(u32::from).flat_map(u32::to_be_bytes).collect(),
            Self::Ascii => text
                .chars()
                .map(|c| u8::try_from(c).ok().filter(u8::is_ascii).unwrap_or(b'?'))
                .collect(),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(c).unwrap_or(b'?'))
                .collect(),
        }
    }

    /// Decodes `bytes`, replacing malformed input with U+FFFD.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dyn_byte_buf::codec::Encoding;
    /// assert_eq!(Encoding::Utf16Le.decode(&[0x41, 0x00]), "A");
    /// assert_eq!(Encoding::Utf8.decode(&[0x41, 0xFF]), "A\u{FFFD}");
    /// ```
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Self::Utf32Le => decode_utf32(bytes, u32::from_le_bytes),
            Self::Utf32Be => decode_utf32(bytes, u32::from_be_bytes),
            Self::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { REPLACEMENT_CHARACTER })
                .collect(),
            Self::Latin1 => bytes.iter().copied().map(char::from).collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "utf16" | "utf-16" | "utf16le" | "utf-16le" => Ok(Self::Utf16Le),
            "utf16be" | "utf-16be" => Ok(Self::Utf16Be),
            "utf32" | "utf-32" | "utf32le" | "utf-32le" => Ok(Self::Utf32Le),
            "utf32be" | "utf-32be" => Ok(Self::Utf32Be),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(Error::unsupported_encoding(name)),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let (units, rest) = bytes.as_chunks::<2>();

    let mut text: String = char::decode_utf16(units.iter().copied().map(unit))
        .map(|c| c.unwrap_or(REPLACEMENT_CHARACTER))
        .collect();

    // A dangling half code unit
    if !rest.is_empty() {
        text.push(REPLACEMENT_CHARACTER);
    }

    text
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> String {
    let (units, rest) = bytes.as_chunks::<4>();

    let mut text: String = units
        .iter()
        .copied()
        .map(|u| char::from_u32(unit(u)).unwrap_or(REPLACEMENT_CHARACTER))
        .collect();

    if !rest.is_empty() {
        text.push(REPLACEMENT_CHARACTER);
    }

    text
}

/// The default codec, backed by [`Encoding`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardCodec;

impl TextCodec for StandardCodec {
    fn encode(&self, text: &str, encoding: &str) -> Result<Vec<u8>> {
        Ok(encoding.parse::<Encoding>()?.encode(text))
    }

    fn decode(&self, bytes: &[u8], encoding: &str) -> Result<String> {
        Ok(encoding.parse::<Encoding>()?.decode(bytes))
    }

    fn supports(&self, encoding: &str) -> bool {
        encoding.parse::<Encoding>().is_ok()
    }
}

/// A codec assembled from an encode function and a decode function.
///
/// Built with [`from_fns`].
pub struct FnCodec<E, D> {
    encode: E,
    decode: D,
}

/// Builds a [`TextCodec`] from a pair of functions.
///
/// # Examples
///
/// A codec that only understands a made-up `"reversed"` encoding:
///
/// ```
/// # use dyn_byte_buf::codec::{self, TextCodec};
/// # use dyn_byte_buf::Error;
/// let reversed = codec::from_fns(
///     |text: &str, encoding: &str| match encoding {
///         "reversed" => Ok(text.bytes().rev().collect()),
///         _ => Err(Error::unsupported_encoding(encoding)),
///     },
///     |bytes: &[u8], encoding: &str| match encoding {
///         "reversed" => Ok(bytes.iter().rev().map(|&b| char::from(b)).collect()),
///         _ => Err(Error::unsupported_encoding(encoding)),
///     },
/// );
///
/// assert_eq!(reversed.encode("abc", "reversed").unwrap(), b"cba");
/// assert!(!reversed.supports("UTF-8"));
/// ```
pub fn from_fns<E, D>(encode: E, decode: D) -> FnCodec<E, D>
where
    E: Fn(&str, &str) -> Result<Vec<u8>> + Send + Sync,
    D: Fn(&[u8], &str) -> Result<String> + Send + Sync,
{
    FnCodec { encode, decode }
}

impl<E, D> fmt::Debug for FnCodec<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodec").finish_non_exhaustive()
    }
}

impl<E, D> TextCodec for FnCodec<E, D>
where
    E: Fn(&str, &str) -> Result<Vec<u8>> + Send + Sync,
    D: Fn(&[u8], &str) -> Result<String> + Send + Sync,
{
    fn encode(&self, text: &str, encoding: &str) -> Result<Vec<u8>> {
        (self.encode)(text, encoding)
    }

    fn decode(&self, bytes: &[u8], encoding: &str) -> Result<String> {
        (self.decode)(bytes, encoding)
    }
}
