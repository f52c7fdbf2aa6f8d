//! The single forward scan that finds where to cut.
//!
//! All mutable state of a scan lives in [`Scan`]. Measuring a fragment on its
//! own (the ellipsis, a word, a discarded tail) runs a separate scan with its
//! own state, so nothing is shared between them.

use std::iter;

use crate::consts::NON_COUNTING_ELEMENTS;
use crate::count;
use crate::cut::{Candidate, Cut, Locator, Mark};
use crate::error::{ErrorKind, Result};
use crate::options::Config;
use crate::scan::{self, Boundary, Kind, Region};
use crate::stack::OpenTags;
use crate::word;
use tracing::instrument;

/// What a scan is looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Goal {
    /// The total countable length, nothing is cut.
    Measure,
    /// A cut after this many countable characters.
    Truncate(usize),
}

enum Outcome {
    Done(Cut),
    /// A closing tag did not match and there was no checkpoint to fall back on.
    Restart { tag: String, position: usize },
}

/// Scans `html` once, and at most once more with forced checkpoints if the
/// markup turns out to be malformed.
#[instrument(level = "trace", skip_all, fields(html_size = html.len(), ?goal))]
pub(crate) fn analyze(html: &str, goal: Goal, config: &Config) -> Result<Cut> {
    if let Outcome::Done(cut) = Scan::new(html, goal, config, false)?.run()? {
        return Ok(cut);
    }
    tracing::debug!("Unmatched closing tag with no checkpoint; rescanning with forced backtracking");
    match Scan::new(html, goal, config, true)?.run()? {
        Outcome::Done(cut) => Ok(cut),
        Outcome::Restart { tag, position } => exn::bail!(ErrorKind::MalformedMarkup { tag, position }),
    }
}

/// Countable length of `html` on its own.
pub(crate) fn measure(html: &str, config: &Config) -> Result<usize> {
    Ok(analyze(html, Goal::Measure, &config.measuring())?.length)
}

/// Countable length of the ellipsis. A single character needs no scan.
fn ellipsis_length(config: &Config) -> Result<usize> {
    match config.unit.len(&config.ellipsis) {
        units @ 0..=1 => Ok(units),
        _ => measure(&config.ellipsis, config),
    }
}

struct Scan<'a> {
    html: &'a str,
    config: &'a Config,
    pos: usize,
    length: usize,
    tags: OpenTags,
    counting: bool,
    region: Region,
    /// Counting state from before the current comment/script/style region.
    region_was_counting: bool,
    /// Start of the text run being counted.
    text_start: usize,
    /// Start of the tag that ends the text run being counted.
    tag_pos: Option<usize>,
    locator: Locator,
}

impl<'a> Scan<'a> {
    fn new(html: &'a str, goal: Goal, config: &'a Config, forced: bool) -> Result<Self> {
        let max_length = match goal {
            Goal::Measure => None,
            Goal::Truncate(max_length) => Some(max_length),
        };
        let ellipsis_length = match max_length {
            Some(_) if config.include_ellipsis_length => Some(ellipsis_length(config)?),
            _ => None,
        };
        Ok(Self {
            html,
            config,
            pos: 0,
            length: 0,
            tags: OpenTags::new(),
            counting: true,
            region: Region::Normal,
            region_was_counting: true,
            text_start: 0,
            tag_pos: None,
            locator: Locator::new(max_length, ellipsis_length, config.whole_word || forced),
        })
    }

    fn run(mut self) -> Result<Outcome> {
        if self.locator.is_target(0) {
            self.reach_target()?;
        }
        loop {
            let boundary = scan::next_boundary(self.html, self.pos, self.region);
            let tag_pos = boundary.as_ref().map_or(self.html.len(), |b| b.start);
            self.tag_pos = Some(tag_pos);
            self.text_start = self.pos;
            if self.counting && !count::is_structural(&self.html[self.pos..tag_pos]) {
                self.count_text(tag_pos)?;
                if self.locator.is_done() {
                    break;
                }
                self.locator.checkpoint(self.pos, self.length);
            } else {
                self.pos = tag_pos;
            }

            let Some(Boundary { end, kind, .. }) = boundary else {
                break;
            };
            match kind {
                Kind::RegionEnd => {
                    self.region = Region::Normal;
                    self.counting = self.region_was_counting;
                },
                Kind::Open { name, void } => {
                    let counting_inside = self.counting && !NON_COUNTING_ELEMENTS.contains(&name.as_str());
                    self.locator.reach_tag(self.pos, &self.tags);
                    if !void {
                        match Region::opened_by(&name) {
                            Some(region) => {
                                self.region = region;
                                self.region_was_counting = self.counting;
                            },
                            None => self.tags.push(name, self.counting),
                        }
                        self.counting = counting_inside;
                    }
                },
                Kind::Close { name } => match self.tags.close(&name) {
                    Ok(tag) => self.counting = tag.was_counting,
                    Err(mismatch) => {
                        if self.config.strict {
                            exn::bail!(ErrorKind::MalformedMarkup { tag: name, position: tag_pos });
                        }
                        if !self.locator.fall_back() {
                            return Ok(Outcome::Restart { tag: name, position: tag_pos });
                        }
                        tracing::debug!(
                            tag = %name,
                            expected = ?mismatch.expected,
                            position = tag_pos,
                            "Unmatched closing tag; cutting at the last counted character"
                        );
                        break;
                    },
                },
            }
            self.pos = end;
        }
        let cut = self.locator.finish(self.pos, self.length, &self.tags, self.html.len());
        Ok(Outcome::Done(cut))
    }

    /// Counts the text from the current position up to `end`, stopping early
    /// once the cut is settled.
    fn count_text(&mut self, end: usize) -> Result<()> {
        let html = self.html;
        let start = self.pos;
        let runs = count::collapsed_runs(&html[start..end])
            .map(|run| start + run.start..start + run.end)
            .chain(iter::once(end..end));
        for run in runs {
            while self.pos < run.start {
                if !self.locator.reach_char(self.pos, &self.tags) {
                    return Ok(());
                }
                let plain = &html[self.pos..run.start];
                let units = self.config.unit.len(plain);
                match self.locator.remaining(self.length) {
                    Some(remaining) if units > remaining => {
                        self.pos += self.config.unit.prefix_len(plain, remaining);
                        self.length += remaining;
                    },
                    _ => {
                        self.pos = run.start;
                        self.length += units;
                    },
                }
                if self.locator.is_target(self.length) {
                    self.reach_target()?;
                }
            }
            if !run.is_empty() {
                if !self.locator.reach_char(self.pos, &self.tags) {
                    return Ok(());
                }
                self.pos = run.end;
                self.length += 1;
                if self.locator.is_target(self.length) {
                    self.reach_target()?;
                }
            }
        }
        debug_assert!(!self.locator.overshoots(self.length), "counted past the target");
        Ok(())
    }

    /// The running length just hit the current target.
    fn reach_target(&mut self) -> Result<()> {
        if self.locator.with_ellipsis.ellipsis == Mark::Pending {
            self.locator.with_ellipsis = self.finalize(&self.locator.with_ellipsis)?;
            self.locator.raise_target();
            if !self.locator.is_target(self.length) {
                return Ok(());
            }
        }
        debug_assert_eq!(self.locator.at_max_length.ellipsis, Mark::Pending, "target reached twice");
        self.locator.at_max_length = self.finalize(&self.locator.at_max_length)?;
        Ok(())
    }

    /// Places the ellipsis of `candidate` at the current position, moved back
    /// to the end of the previous word when cutting at whole words.
    fn finalize(&self, candidate: &Candidate) -> Result<Candidate> {
        let mut candidate = candidate.clone();
        candidate.ellipsis = Mark::At(self.pos);
        candidate.length = self.length;
        if !self.config.whole_word || self.tag_pos == Some(self.pos) || self.word_is_long_enough()? {
            return Ok(candidate);
        }
        match word::word_end(self.html.as_bytes(), self.text_start, self.pos).filter(|&end| end > 0) {
            Some(end) if end != self.pos => {
                let dropped = measure(&self.html[end..self.pos], self.config)?;
                tracing::trace!(from = self.pos, to = end, dropped, "Moved cut back to the previous word");
                candidate.ellipsis = Mark::At(end);
                candidate.truncate = Mark::At(end);
                candidate.open_tags = self.tags.clone();
                candidate.length = self.length.saturating_sub(dropped);
            },
            Some(_) => {},
            None => {
                tracing::trace!(from = self.pos, "No previous word in this text; using the last checkpoint");
                candidate = self.locator.last_counted.clone();
            },
        }
        Ok(candidate)
    }

    /// Whether the word being cut is already long enough to keep partially.
    fn word_is_long_enough(&self) -> Result<bool> {
        let Some(threshold) = self.config.cut_word else {
            return Ok(false);
        };
        if self.pos <= self.text_start {
            return Ok(false);
        }
        let start = word::word_start(self.html.as_bytes(), self.text_start, self.pos)
            .filter(|&start| start > self.text_start)
            .unwrap_or(self.text_start);
        // Bytes bound characters from above, so short words skip the scan.
        Ok(self.pos - start >= threshold && measure(&self.html[start..self.pos], self.config)? >= threshold)
    }
}
