//! Section type produced by the splitter

use serde::{Deserialize, Serialize};
use std::fmt;

/// One verse or chorus block of a song's lyrics.
///
/// A section is a contiguous, trimmed fragment of the source text bounded by
/// recognized marker lines. It has no identity beyond its position in the
/// sequence the splitter produced it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Trimmed text of the block.
    pub text: String,
}

impl Section {
    /// Create a section from already-trimmed text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Section {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
