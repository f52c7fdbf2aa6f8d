//! Truncation of HTML fragments to a number of visible characters.
//!
//! Only text that a reader would see is counted:
//!
//! - tags are free, and whitespace that only separates tags is not content;
//! - a run of whitespace (including `&nbsp;` and `<br>`) counts as one
//!   character, as does a lone `<br>` or any character entity;
//! - nothing inside `<head>`, `<noscript>`, `<script>`, `<style>` or comments
//!   is counted.
//!
//! Elements left open by the cut are closed again, innermost first. The input
//! is never parsed into a tree: a single forward scan finds the cut, and
//! unmatched closing tags are recovered from by cutting at the last counted
//! character (or reported, see [`Options::with_strict`]).
//!
//! ```rust
//! let html = "<p><b>A</b> red ball.</p>";
//! assert_eq!(snip_html::truncate(6, html).unwrap(), "<p><b>A</b> red\u{2026}</p>");
//! assert_eq!(snip_html::count(html).unwrap(), 11);
//! ```

mod analyze;
mod consts;
mod count;
mod cut;
pub mod error;
mod options;
mod scan;
mod stack;
mod truncate;
mod word;

use crate::error::Result;
pub use crate::options::{CountingUnit, CutWord, Options};
pub use crate::truncate::Truncator;

/// Truncates `html` to `max_length` visible characters with default
/// [`Options`]: a `…` ellipsis counted against the budget, cutting at whole
/// words. A negative `max_length` removes that many characters from the end.
pub fn truncate(max_length: i64, html: &str) -> Result<String> {
    Truncator::default().truncate(max_length, html)
}

/// Same as [`truncate`], with custom options.
///
/// ```rust
/// use snip_html::Options;
/// let options = Options::new().with_ellipsis("...").with_whole_word(false);
/// let html = "<blockquote>A lumberjack</blockquote>";
/// assert_eq!(snip_html::truncate_with(7, html, &options).unwrap(), "<blockquote>A lu...</blockquote>");
/// ```
pub fn truncate_with(max_length: i64, html: &str, options: &Options) -> Result<String> {
    Truncator::from(options).truncate(max_length, html)
}

/// Number of visible characters in `html`, counted in Unicode scalar values.
pub fn count(html: &str) -> Result<usize> {
    Truncator::default().count(html)
}
