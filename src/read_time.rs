//! Reading time estimate.

/// Assumed reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimate reading time in whole minutes, rounded up.
///
/// Words are runs of non-whitespace. Empty or whitespace-only text counts as
/// one word, so the result is never below 1. Dense scripts without spaces
/// (CJK) are undercounted.
pub fn estimate(body: &str) -> u32 {
    let words = body.split_whitespace().count().max(1);
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE)).unwrap_or(u32::MAX)
}
