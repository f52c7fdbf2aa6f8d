//! Candidate cut points, tracked side by side during a single scan.
//!
//! Each candidate first settles where the ellipsis goes (when its target length
//! is reached), then where the kept markup ends (at the next countable
//! character or opening tag). For the full budget an opening tag only holds
//! the cut: if no countable character follows it, nothing was dropped and the
//! input is kept whole. Three candidates compete:
//!
//! - `at_max_length`: the target is the full budget;
//! - `with_ellipsis`: the target is the budget minus the ellipsis' own length;
//! - `last_counted`: a checkpoint following the last counted character, used
//!   as the fallback for whole-word and malformed-markup recovery.

use crate::stack::OpenTags;

/// A position that is either still being looked for, or will never be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mark {
    Pending,
    Disabled,
    At(usize),
}
impl Mark {
    pub(crate) fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) ellipsis: Mark,
    /// Countable length of the input before `ellipsis`.
    pub(crate) length: usize,
    pub(crate) truncate: Mark,
    /// Elements still open at `truncate`.
    pub(crate) open_tags: OpenTags,
}
impl Candidate {
    fn seeking() -> Self {
        Self { ellipsis: Mark::Pending, length: 0, truncate: Mark::Pending, open_tags: OpenTags::new() }
    }

    fn disabled() -> Self {
        Self { ellipsis: Mark::Disabled, truncate: Mark::Disabled, ..Self::seeking() }
    }

    fn checkpoint() -> Self {
        Self { ellipsis: Mark::At(0), ..Self::seeking() }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.ellipsis != Mark::Disabled
    }

    /// Records where the kept markup ends, unless that is already known.
    fn close_at(&mut self, pos: usize, open_tags: &OpenTags) {
        if self.truncate == Mark::Pending {
            self.truncate = Mark::At(pos);
            self.open_tags = open_tags.clone();
        }
    }

    /// Fills in whatever is still pending once the scan has stopped at `pos`.
    fn settle(mut self, pos: usize, length: usize, open_tags: &OpenTags) -> Cut {
        if self.ellipsis == Mark::Pending {
            self.ellipsis = Mark::At(pos);
            self.length = length;
        }
        self.close_at(pos, open_tags);
        let at = |mark: Mark| match mark {
            Mark::At(at) => at,
            Mark::Pending | Mark::Disabled => pos,
        };
        Cut {
            ellipsis: at(self.ellipsis),
            truncate: at(self.truncate),
            length: self.length,
            open_tags: self.open_tags,
        }
    }
}

/// The outcome of a scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cut {
    pub(crate) ellipsis: usize,
    pub(crate) truncate: usize,
    pub(crate) length: usize,
    pub(crate) open_tags: OpenTags,
}

#[derive(Debug)]
pub(crate) struct Locator {
    pub(crate) at_max_length: Candidate,
    pub(crate) with_ellipsis: Candidate,
    pub(crate) last_counted: Candidate,
    /// Length currently being looked for, `None` when only measuring.
    target: Option<usize>,
    max_length: Option<usize>,
    /// `at_max_length` was closed at an opening tag and nothing counted since.
    held: bool,
}
impl Locator {
    /// `ellipsis_length` is `Some` when the ellipsis is charged against the
    /// budget; `checkpoints` enables the `last_counted` candidate.
    pub(crate) fn new(max_length: Option<usize>, ellipsis_length: Option<usize>, checkpoints: bool) -> Self {
        let (target, with_ellipsis) = match (max_length, ellipsis_length) {
            (Some(max), Some(ellipsis)) => (Some(max.saturating_sub(ellipsis)), Candidate::seeking()),
            _ => (max_length, Candidate::disabled()),
        };
        Self {
            at_max_length: Candidate::seeking(),
            with_ellipsis,
            last_counted: if checkpoints { Candidate::checkpoint() } else { Candidate::disabled() },
            target,
            max_length,
            held: false,
        }
    }

    pub(crate) fn is_target(&self, length: usize) -> bool {
        self.target == Some(length)
    }

    /// Countable characters left before the current target, `None` if unbounded.
    pub(crate) fn remaining(&self, length: usize) -> Option<usize> {
        self.target.map(|target| target.saturating_sub(length))
    }

    pub(crate) fn overshoots(&self, length: usize) -> bool {
        self.target.is_some_and(|target| length > target)
    }

    /// Moves on from the ellipsis-inclusive target to the full budget.
    pub(crate) fn raise_target(&mut self) {
        self.target = self.max_length;
    }

    /// A countable character starts at `pos`. Returns `false` once the
    /// full-budget candidate is settled and scanning can stop.
    pub(crate) fn reach_char(&mut self, pos: usize, open_tags: &OpenTags) -> bool {
        self.close_others(pos, open_tags);
        if self.at_max_length.ellipsis.is_set() {
            // A held cut keeps its earlier tag position and open elements.
            self.at_max_length.close_at(pos, open_tags);
            self.held = false;
            return false;
        }
        true
    }

    /// An opening tag starts at `pos`. The full-budget cut is only held here
    /// until a countable character confirms it.
    pub(crate) fn reach_tag(&mut self, pos: usize, open_tags: &OpenTags) {
        self.close_others(pos, open_tags);
        if self.at_max_length.ellipsis.is_set() && self.at_max_length.truncate == Mark::Pending {
            self.at_max_length.close_at(pos, open_tags);
            self.held = true;
        }
    }

    fn close_others(&mut self, pos: usize, open_tags: &OpenTags) {
        self.last_counted.close_at(pos, open_tags);
        if self.with_ellipsis.ellipsis.is_set() {
            self.with_ellipsis.close_at(pos, open_tags);
        }
    }

    /// Moves the checkpoint to `pos` after a run of text changed the length.
    pub(crate) fn checkpoint(&mut self, pos: usize, length: usize) {
        if self.last_counted.is_enabled() && self.last_counted.length != length {
            self.last_counted.ellipsis = Mark::At(pos);
            self.last_counted.truncate = Mark::Pending;
            self.last_counted.length = length;
        }
    }

    /// Adopts the checkpoint as the final result, if checkpoints are tracked.
    pub(crate) fn fall_back(&mut self) -> bool {
        if !self.last_counted.is_enabled() {
            return false;
        }
        self.at_max_length = self.last_counted.clone();
        self.held = false;
        true
    }

    pub(crate) fn is_done(&self) -> bool {
        self.at_max_length.truncate.is_set() && !self.held
    }

    /// Completes the candidates at `pos` and picks the result. When the whole
    /// input fits the full budget it is kept, whatever the ellipsis costs.
    pub(crate) fn finish(self, pos: usize, length: usize, open_tags: &OpenTags, input_len: usize) -> Cut {
        let mut at_max_length = self.at_max_length.settle(pos, length, open_tags);
        if self.held {
            // Only markup followed the held cut.
            at_max_length.truncate = input_len;
        }
        if self.with_ellipsis.is_enabled() && at_max_length.truncate != input_len {
            return self.with_ellipsis.settle(pos, length, open_tags);
        }
        at_max_length
    }
}
