//! Page-window selection over a section sequence

use crate::error::{LyricsError, Result};
use crate::section::Section;
use serde::{Deserialize, Serialize};

/// A read-only window over an ordered section sequence, addressed by a
/// 1-based page number and a page size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPage {
    /// Sections on this page, in source order.
    pub items: Vec<Section>,
    /// 1-based page number this window was requested with.
    pub page: u32,
    /// Requested page size; `items` never exceeds it.
    pub page_size: u32,
}

impl SectionPage {
    /// True when the requested window lies past the end of the sequence.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Select one page from an ordered section sequence.
///
/// `page` is 1-based; both `page` and `page_size` must be at least 1, else
/// this fails with [`LyricsError::InvalidArgument`] naming the offending
/// parameter. Requesting a page past the end of the sequence is a valid,
/// harmless query and returns an empty page rather than an error: section
/// counts are unbounded and callers cannot know them up front.
pub fn page(sections: &[Section], page: u32, page_size: u32) -> Result<SectionPage> {
    if page < 1 {
        return Err(LyricsError::InvalidArgument { param: "page" });
    }
    if page_size < 1 {
        return Err(LyricsError::InvalidArgument { param: "page_size" });
    }

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let items = if start >= sections.len() {
        Vec::new()
    } else {
        let end = (start + page_size as usize).min(sections.len());
        sections[start..end].to_vec()
    };

    Ok(SectionPage {
        items,
        page,
        page_size,
    })
}
