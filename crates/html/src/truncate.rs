//! Resolving lengths and assembling the truncated HTML.

use crate::analyze::{self, Goal};
use crate::error::{ErrorKind, Result};
use crate::options::{Config, Options};
use exn::ResultExt;
use tracing::instrument;

/// Truncates HTML with a fixed set of options.
///
/// Options are resolved once on construction; every call (and every
/// measurement it makes internally) uses that same configuration.
///
/// # Example
///
/// ```rust
/// use snip_html::{Options, Truncator};
/// let truncator = Truncator::new(Options::new().with_whole_word(false));
/// let html = "<p><b>A</b> red ball.</p>";
/// assert_eq!(truncator.truncate(9, html).unwrap(), "<p><b>A</b> red ba\u{2026}</p>");
/// assert_eq!(truncator.count(html).unwrap(), 11);
/// ```
#[derive(Clone, Debug)]
pub struct Truncator {
    config: Config,
}

impl Truncator {
    pub fn new(options: Options) -> Self {
        Self::from(&options)
    }

    /// Shortens `html` to `max_length` countable characters, ellipsis
    /// included unless configured otherwise. A negative `max_length` removes
    /// that many countable characters from the end instead.
    ///
    /// Elements left open by the cut are closed, innermost first. If the whole
    /// of `html` fits, it is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedMarkup`] in strict mode when a closing tag
    /// does not match the innermost open element, and
    /// [`ErrorKind::InvalidArgument`] if `max_length` cannot be represented on
    /// this platform.
    #[instrument(skip(self, html), fields(html_size = html.len()))]
    pub fn truncate(&self, max_length: i64, html: &str) -> Result<String> {
        let max_length = self.resolve_length(max_length, html)?;
        let cut = analyze::analyze(html, Goal::Truncate(max_length), &self.config)?;
        debug_assert!(cut.ellipsis <= cut.truncate && cut.truncate <= html.len());
        if cut.truncate >= html.len() {
            return Ok(html.to_string());
        }
        tracing::debug!(
            ellipsis = cut.ellipsis,
            truncate = cut.truncate,
            length = cut.length,
            "Truncating HTML"
        );
        let closing_tags = cut.open_tags.closing_tags();
        let mut out = String::with_capacity(cut.truncate + self.config.ellipsis.len() + closing_tags.len());
        out.push_str(&html[..cut.ellipsis]);
        out.push_str(&self.config.ellipsis);
        out.push_str(&html[cut.ellipsis..cut.truncate]);
        out.push_str(&closing_tags);
        Ok(out)
    }

    /// Number of countable characters in `html`.
    #[instrument(skip(self, html), fields(html_size = html.len()))]
    pub fn count(&self, html: &str) -> Result<usize> {
        analyze::measure(html, &self.config)
    }

    fn resolve_length(&self, max_length: i64, html: &str) -> Result<usize> {
        let magnitude = usize::try_from(max_length.unsigned_abs())
            .or_raise(|| ErrorKind::InvalidArgument(format!("length out of range: {max_length}")))?;
        if max_length >= 0 {
            return Ok(magnitude);
        }
        let total = self.count(html)?;
        Ok(total.saturating_sub(magnitude))
    }
}
impl Default for Truncator {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
impl From<&Options> for Truncator {
    fn from(options: &Options) -> Self {
        Self { config: Config::from(options) }
    }
}
impl From<Options> for Truncator {
    fn from(options: Options) -> Self {
        Self::from(&options)
    }
}
