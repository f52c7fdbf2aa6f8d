//! Counting rules for text between tags.

use crate::CountingUnit;
use crate::consts::{COLLAPSE_REGEX, STRUCTURAL_SPACES};
use std::ops::Range;

/// Whitespace-only text between two tags is layout, not content.
pub(crate) fn is_structural(text: &str) -> bool {
    text.bytes().all(|b| STRUCTURAL_SPACES.contains(&b))
}

/// Byte ranges (relative to `text`) of sequences that count as exactly one
/// character: whitespace runs and character entities.
pub(crate) fn collapsed_runs(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    COLLAPSE_REGEX.find_iter(text).map(|m| m.range())
}

impl CountingUnit {
    /// Number of countable characters in plain `text`.
    pub(crate) fn len(&self, text: &str) -> usize {
        match self {
            Self::Codepoint => text.chars().count(),
            Self::Byte => text.len(),
        }
    }

    /// Byte length of the longest prefix of `text` holding at most `units`
    /// characters. Never splits a UTF-8 sequence, so in byte mode the prefix
    /// can be shorter than requested.
    pub(crate) fn prefix_len(&self, text: &str, units: usize) -> usize {
        match self {
            Self::Codepoint => text.char_indices().nth(units).map_or(text.len(), |(i, _)| i),
            Self::Byte => {
                let mut end = units.min(text.len());
                while !text.is_char_boundary(end) {
                    end -= 1;
                }
                end
            },
        }
    }
}
