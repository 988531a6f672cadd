#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Permissive number parsing for puzzle input.
//!
//! Puzzle files are hand-copied text, and both solvers accept whatever numeric
//! prefix a token carries: leading whitespace and a `+` are skipped, the
//! longest run of ASCII digits is taken, and anything after it is ignored. A
//! token with no digits at all reads as zero. Callers get `None` in that case
//! so they can report the degraded token before substituting zero.

/// Parses the leading run of decimal digits in `text`.
///
/// An optional `+` may precede the digits. A run too long for a `u64`
/// saturates at `u64::MAX` and is logged. Returns `None` when `text` (after
/// leading whitespace and sign) does not start with a digit.
///
/// # Examples
///
/// ```
/// use puzzle_solvers::lenient::leading_number;
///
/// assert_eq!(leading_number("48"), Some(48));
/// assert_eq!(leading_number("  12abc"), Some(12));
/// assert_eq!(leading_number("+5"), Some(5));
/// assert_eq!(leading_number("abc"), None);
/// ```
#[must_use]
pub fn leading_number(text: &str) -> Option<u64> {
    let unsigned = text.trim_start();
    let unsigned = unsigned.strip_prefix('+').unwrap_or(unsigned);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return None;
    }

    Some(digits.parse().unwrap_or_else(|_| {
        tracing::warn!("{digits} does not fit in 64 bits, reading it as {}", u64::MAX);
        u64::MAX
    }))
}

/// Like [`leading_number`], but degrades to zero and logs the token that was
/// replaced.
#[must_use]
pub fn number_or_zero(text: &str, what: &str) -> u64 {
    leading_number(text).unwrap_or_else(|| {
        tracing::warn!("{what} {text:?} is not numeric, reading it as 0");
        0
    })
}
