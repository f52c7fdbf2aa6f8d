use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Opening/closing tags (including `<!DOCTYPE`) and the start of a comment. The
// line-break tag also matches here, the scanner skips it since it counts as
// whitespace rather than structure.
regex!(TAG_REGEX, r"(?i)</?([0-9A-Za-z_]+|!DOCTYPE)[^>]*>|<!--");
regex!(SCRIPT_END_REGEX, r"(?i)</script>");
regex!(STYLE_END_REGEX, r"(?i)</style>");
// Sequences that count as a single character: runs of two or more spaces
// (including entities and line breaks), a lone line break, or any one
// character entity.
regex!(
    COLLAPSE_REGEX,
    r"(?i)(?:[\t\n\x0B\x0C\r ]|&nbsp;|<br ?/?>|&tab;|&newline;){2,}|<br ?/?>|&[0-9a-z]{2,8};|&#[0-9]{1,7};|&#x[0-9a-f]{1,6};"
);

pub(crate) const COMMENT_OPEN: &str = "<!--";
pub(crate) const COMMENT_CLOSE: &[u8] = b"-->";
/// Tag name recorded for a comment, so that it participates in the
/// non-counting lookup like any other element.
pub(crate) const COMMENT_NAME: &str = "!--";
pub(crate) const LINE_BREAK_NAME: &str = "br";

/// Text between two tags made only of these bytes is structural and never counted.
pub(crate) const STRUCTURAL_SPACES: &[u8] = b" \t\n\r\x0C";

/// Elements that never hold content, and therefore never open a stack frame.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr", "!doctype", "basefont", "frame", "isindex",
];

/// Elements whose content is excluded from the count.
pub(crate) const NON_COUNTING_ELEMENTS: &[&str] = &["head", "noscript", "script", "style", COMMENT_NAME];

/// Separators between whole words, matched in any ASCII case; single
/// whitespace bytes are handled separately.
pub(crate) const WORD_SEPARATORS: &[&[u8]] = &[
    b"&nbsp;",
    b"<br>",
    b"<br/>",
    b"<br />",
    b"<br >",
    b"&tab;",
    b"&newline;",
];

pub(crate) const DEFAULT_ELLIPSIS: &str = "\u{2026}";
pub(crate) const DEFAULT_BYTE_ELLIPSIS: &str = "...";
pub(crate) const DEFAULT_CUT_WORD: usize = 18;
