//! Capacity planning for buffer growth.
//!
//! A buffer never asks the allocator for exactly the bytes it needs. It asks [`plan`] instead,
//! which rounds the request to the buffer's page size so that small writes don't each trigger a
//! reallocation.

/// Returns the allocation size for a buffer holding `length` bytes.
///
/// The rule is linear page rounding with a one page minimum:
///
/// - `length <= page_size` allocates exactly one page.
/// - Otherwise `length` is rounded up to the next multiple of `page_size`.
///
/// The result is never less than `length`. A `page_size` of zero is treated as one, and a rounded
/// size that doesn't fit in `usize` saturates at `usize::MAX`.
///
/// # Examples
///
/// ```
/// # use dyn_byte_buf::capacity::plan;
/// // One page minimum
/// assert_eq!(plan(0, 4096), 4096);
/// assert_eq!(plan(100, 4096), 4096);
/// assert_eq!(plan(4096, 4096), 4096);
///
/// // Linear rounding once past a page
/// assert_eq!(plan(4097, 4096), 2 * 4096);
/// assert_eq!(plan(5 * 4096 - 1, 4096), 5 * 4096);
/// ```
#[inline]
pub const fn plan(length: usize, page_size: usize) -> usize {
    // Keeps the division below well-defined.
    let page_size = if page_size == 0 { 1 } else { page_size };

    // Min bounds check
    if length <= page_size {
        return page_size;
    }

    // Round up `length` to the nearest multiple of `page_size`
    match length.div_ceil(page_size).checked_mul(page_size) {
        Some(size) => size,
        None => usize::MAX,
    }
}
