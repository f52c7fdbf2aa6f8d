//! Stack of elements opened, and not yet closed, at the current position.

/// An open element, and whether characters were being counted before it opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OpenTag {
    pub(crate) name: String,
    pub(crate) was_counting: bool,
}

/// A closing tag that does not match the innermost open element.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Mismatch {
    pub(crate) expected: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct OpenTags(Vec<OpenTag>);

impl OpenTags {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, was_counting: bool) {
        self.0.push(OpenTag { name: name.into(), was_counting });
    }

    /// Closes the innermost element if its name matches. On a mismatch the
    /// stack is left exactly as it was.
    pub(crate) fn close(&mut self, name: &str) -> Result<OpenTag, Mismatch> {
        match self.0.pop() {
            Some(tag) if tag.name == name => Ok(tag),
            Some(tag) => {
                let expected = Some(tag.name.clone());
                self.0.push(tag);
                Err(Mismatch { expected })
            },
            None => Err(Mismatch { expected: None }),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Closing tags for every open element, innermost first, without attributes.
    pub(crate) fn closing_tags(&self) -> String {
        let capacity = self.0.iter().map(|tag| tag.name.len() + 3).sum();
        self.0.iter().rev().fold(String::with_capacity(capacity), |mut out, tag| {
            out.push_str("</");
            out.push_str(&tag.name);
            out.push('>');
            out
        })
    }
}
