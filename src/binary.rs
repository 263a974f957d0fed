//! The binary string view of a byte sequence.
//!
//! A binary string maps every byte to exactly one character, `0x00` to U+0000 through `0xFF` to
//! U+00FF. It is a reinterpretation, not a text decode, so any byte sequence has one and the
//! mapping is trivially reversible with [`from_binary_string`].

/// Byte to character lookup table.
pub static MAPPING: [char; 256] = build_mapping();

#[expect(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    reason = "Bounded by u8::MAX"
)]
const fn build_mapping() -> [char; 256] {
    let mut table = ['\0'; 256];
    let mut byte: u8 = 0;

    loop {
        table[byte as usize] = byte as char;

        if byte == u8::MAX {
            break;
        }
        byte += 1;
    }

    table
}

/// Maps every byte through [`MAPPING`].
///
/// # Examples
///
/// ```
/// # use dyn_byte_buf::binary::to_binary_string;
/// assert_eq!(to_binary_string(b"Hi"), "Hi");
/// assert_eq!(to_binary_string(&[0xFF]), "\u{FF}");
/// ```
#[expect(clippy::indexing_slicing, reason = "Every u8 indexes the table")]
pub fn to_binary_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| MAPPING[usize::from(b)]).collect()
}

/// Reverses [`to_binary_string`].
///
/// Returns `None` if `text` contains a character above U+00FF.
pub fn from_binary_string(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(c).ok()).collect()
}
