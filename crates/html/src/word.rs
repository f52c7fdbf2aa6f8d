//! Word boundary search used when truncating at whole words.
//!
//! Operates on bytes: every separator is ASCII, so any position found here is
//! also a character boundary of the input `&str`.

use crate::consts::WORD_SEPARATORS;

const SPACES: &[u8] = b" \t\n\x0B\x0C\r";

fn separator_ends_at(bytes: &[u8], pos: usize) -> bool {
    let head = &bytes[..pos];
    head.last().is_some_and(|b| SPACES.contains(b))
        || WORD_SEPARATORS
            .iter()
            .any(|sep| head.len() >= sep.len() && head[head.len() - sep.len()..].eq_ignore_ascii_case(sep))
}

fn separator_starts_at(bytes: &[u8], pos: usize) -> bool {
    let tail = &bytes[pos..];
    tail.first().is_some_and(|b| SPACES.contains(b))
        || WORD_SEPARATORS.iter().any(|sep| tail.get(..sep.len()).is_some_and(|t| t.eq_ignore_ascii_case(sep)))
}

/// Last position in `from..=to` where a word starts: right after a separator,
/// and not itself the start of another separator.
pub(crate) fn word_start(bytes: &[u8], from: usize, to: usize) -> Option<usize> {
    (from..=to)
        .rev()
        .find(|&pos| pos < bytes.len() && separator_ends_at(bytes, pos) && !separator_starts_at(bytes, pos))
}

/// Last position in `from..=to` where a word ends: right before a separator,
/// and not itself preceded by one.
pub(crate) fn word_end(bytes: &[u8], from: usize, to: usize) -> Option<usize> {
    (from..=to)
        .rev()
        .find(|&pos| !separator_ends_at(bytes, pos) && separator_starts_at(bytes, pos))
}
