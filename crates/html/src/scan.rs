//! Locates the next tag, or the end of the current raw region.

use crate::consts::{
    COMMENT_CLOSE, COMMENT_NAME, COMMENT_OPEN, LINE_BREAK_NAME, SCRIPT_END_REGEX, STYLE_END_REGEX, TAG_REGEX,
    VOID_ELEMENTS,
};
use memchr::memmem;

/// What kind of content the scanner is currently inside of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Region {
    #[default]
    Normal,
    Comment,
    Script,
    Style,
}
impl Region {
    /// The region an opening tag starts, if it starts one.
    pub(crate) fn opened_by(name: &str) -> Option<Self> {
        match name {
            COMMENT_NAME => Some(Self::Comment),
            "script" => Some(Self::Script),
            "style" => Some(Self::Style),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    /// An opening tag; `void` tags never hold content.
    Open { name: String, void: bool },
    Close { name: String },
    /// End of a comment, script or style region.
    RegionEnd,
}

/// A tag or region marker spanning `start..end` in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Boundary {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) kind: Kind,
}

/// Finds the next boundary at or after `from`. Anything that does not look
/// like a tag (a stray `<`, a line break) is left to be read as text.
pub(crate) fn next_boundary(html: &str, from: usize, region: Region) -> Option<Boundary> {
    match region {
        Region::Normal => next_tag(html, from),
        Region::Comment => memmem::find(&html.as_bytes()[from..], COMMENT_CLOSE).map(|offset| Boundary {
            start: from + offset,
            end: from + offset + COMMENT_CLOSE.len(),
            kind: Kind::RegionEnd,
        }),
        Region::Script | Region::Style => {
            let regex = if region == Region::Script { &SCRIPT_END_REGEX } else { &STYLE_END_REGEX };
            regex.find_at(html, from).map(|m| Boundary { start: m.start(), end: m.end(), kind: Kind::RegionEnd })
        },
    }
}

fn next_tag(html: &str, mut from: usize) -> Option<Boundary> {
    loop {
        let captures = TAG_REGEX.captures_at(html, from)?;
        let whole = captures.get(0)?;
        let tag = whole.as_str();
        if tag == COMMENT_OPEN {
            return Some(Boundary {
                start: whole.start(),
                end: whole.end(),
                kind: Kind::Open { name: COMMENT_NAME.to_string(), void: false },
            });
        }
        let name = captures.get(1)?.as_str();
        if name.eq_ignore_ascii_case(LINE_BREAK_NAME) {
            // `<` is a single byte, so the next search cannot land mid-character.
            from = whole.start() + 1;
            continue;
        }
        let name = name.to_ascii_lowercase();
        let kind = if tag.starts_with("</") {
            Kind::Close { name }
        } else {
            let void = tag.ends_with("/>") || VOID_ELEMENTS.contains(&name.as_str());
            Kind::Open { name, void }
        };
        return Some(Boundary { start: whole.start(), end: whole.end(), kind });
    }
}
