//! Truncation options, and their resolution into an immutable configuration.

use crate::consts::{DEFAULT_BYTE_ELLIPSIS, DEFAULT_CUT_WORD, DEFAULT_ELLIPSIS};
use crate::error::{Error, ErrorKind};
use exn::OptionExt;
use std::str::FromStr;

/// The unit that countable characters are measured in.
///
/// Positions into the HTML are always byte offsets, only the budget changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "String"))]
pub enum CountingUnit {
    /// One Unicode scalar value counts as one character.
    #[default]
    Codepoint,
    /// One byte of UTF-8 counts as one character. Multi-byte characters are
    /// never split: if one does not fit, the budget ends before it.
    Byte,
}
impl CountingUnit {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "codepoint" | "codepoints" | "char" | "chars" | "utf8" | "utf-8" => Some(Self::Codepoint),
            "byte" | "bytes" => Some(Self::Byte),
            _ => None,
        }
    }
}
impl FromStr for CountingUnit {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_raise(|| ErrorKind::InvalidArgument(format!("unknown counting unit: {s}")))
    }
}
impl TryFrom<String> for CountingUnit {
    type Error = ErrorKind;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| ErrorKind::InvalidArgument(format!("unknown counting unit: {value}")))
    }
}

/// Minimum length of a partially-included word before whole-word truncation
/// gives up on moving back to the previous word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "RawCutWord"))]
pub enum CutWord {
    /// Always move back to the end of the previous whole word.
    Disabled,
    /// Keep a cut inside a word once that word has at least this many
    /// countable characters. Zero behaves like [`Disabled`](Self::Disabled).
    MinLength(usize),
}
impl Default for CutWord {
    fn default() -> Self {
        Self::MinLength(DEFAULT_CUT_WORD)
    }
}
impl CutWord {
    /// The effective threshold, if any.
    pub fn threshold(&self) -> Option<usize> {
        match self {
            Self::MinLength(n) if *n > 0 => Some(*n),
            _ => None,
        }
    }

    fn parse(s: &str) -> Result<Self, ErrorKind> {
        match s.trim().to_lowercase().as_str() {
            "off" | "false" | "disabled" | "none" => Ok(Self::Disabled),
            other => other
                .parse::<i64>()
                .map_err(|_| ErrorKind::InvalidArgument(format!("cut word threshold is not a number: {s}")))
                .and_then(Self::from_signed),
        }
    }

    fn from_signed(value: i64) -> Result<Self, ErrorKind> {
        usize::try_from(value)
            .map(Self::MinLength)
            .map_err(|_| ErrorKind::InvalidArgument(format!("cut word threshold must not be negative: {value}")))
    }
}
impl FromStr for CutWord {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse(s) {
            Ok(cut_word) => Ok(cut_word),
            Err(kind) => exn::bail!(kind),
        }
    }
}
impl TryFrom<i64> for CutWord {
    type Error = Error;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match Self::from_signed(value) {
            Ok(cut_word) => Ok(cut_word),
            Err(kind) => exn::bail!(kind),
        }
    }
}

/// Accepted spellings of [`CutWord`] in configuration files: `false`, a
/// number, or any string understood by [`CutWord::from_str`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawCutWord {
    Flag(bool),
    Length(i64),
    Text(String),
}
#[cfg(feature = "serde")]
impl TryFrom<RawCutWord> for CutWord {
    type Error = ErrorKind;
    fn try_from(value: RawCutWord) -> Result<Self, Self::Error> {
        match value {
            RawCutWord::Flag(false) => Ok(Self::Disabled),
            RawCutWord::Flag(true) => Ok(Self::default()),
            RawCutWord::Length(n) => Self::from_signed(n),
            RawCutWord::Text(s) => Self::parse(&s),
        }
    }
}

/// Caller-facing truncation options.
///
/// # Example
///
/// ```rust
/// use snip_html::{CutWord, Options};
/// let options = Options::new()
///     .with_ellipsis(" [more]")
///     .with_whole_word(true)
///     .with_cut_word(CutWord::Disabled);
/// assert_eq!(options.ellipsis.as_deref(), Some(" [more]"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Text inserted at the cut. Defaults to `…`, or `...` when counting bytes.
    pub ellipsis: Option<String>,
    /// Whether the ellipsis is charged against the budget.
    pub include_ellipsis_length: bool,
    /// Whether to cut at the end of the last whole word.
    pub whole_word: bool,
    pub cut_word: CutWord,
    pub unit: CountingUnit,
    /// Fail on mismatched closing tags instead of recovering from them.
    pub strict: bool,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            ellipsis: None,
            include_ellipsis_length: true,
            whole_word: true,
            cut_word: CutWord::default(),
            unit: CountingUnit::default(),
            strict: false,
        }
    }
}
impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = Some(ellipsis.into());
        self
    }

    pub fn with_include_ellipsis_length(mut self, include: bool) -> Self {
        self.include_ellipsis_length = include;
        self
    }

    pub fn with_whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    pub fn with_cut_word(mut self, cut_word: CutWord) -> Self {
        self.cut_word = cut_word;
        self
    }

    pub fn with_unit(mut self, unit: CountingUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Options with every default resolved. Built once per top-level call and
/// passed unchanged to every sub-measurement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) ellipsis: String,
    pub(crate) include_ellipsis_length: bool,
    pub(crate) whole_word: bool,
    pub(crate) cut_word: Option<usize>,
    pub(crate) unit: CountingUnit,
    pub(crate) strict: bool,
}
impl From<&Options> for Config {
    fn from(options: &Options) -> Self {
        let ellipsis = options.ellipsis.clone().unwrap_or_else(|| {
            match options.unit {
                CountingUnit::Codepoint => DEFAULT_ELLIPSIS,
                CountingUnit::Byte => DEFAULT_BYTE_ELLIPSIS,
            }
            .to_string()
        });
        Self {
            ellipsis,
            include_ellipsis_length: options.include_ellipsis_length,
            whole_word: options.whole_word,
            cut_word: options.cut_word.threshold(),
            unit: options.unit,
            strict: options.strict,
        }
    }
}
impl Config {
    /// Configuration for a measurement-only pass: nothing is inserted and no
    /// word boundary adjustment happens.
    pub(crate) fn measuring(&self) -> Self {
        Self {
            ellipsis: String::new(),
            include_ellipsis_length: false,
            whole_word: false,
            ..self.clone()
        }
    }
}
