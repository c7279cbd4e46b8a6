//! Marker-based splitting of lyrics text into sections

use crate::section::Section;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a structural marker line: the word "verse" (optionally numbered)
/// or "chorus", case-insensitive, with optional surrounding brackets and an
/// optional trailing colon. The pattern is anchored to the whole line so
/// ordinary lyrics mentioning a chorus are not treated as markers.
static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*\[?(?:verse[ \t]*\d*|chorus)[ \t]*\]?[ \t]*:?[ \t]*\r?$")
        .expect("marker pattern is valid")
});

/// Split raw lyrics text into ordered sections.
///
/// Marker lines delimit sections and are themselves discarded: the content
/// strictly between consecutive markers (and before the first marker / after
/// the last) becomes one section, trimmed of surrounding whitespace.
/// Fragments that are empty after trimming are dropped.
///
/// Text containing no markers becomes a single section holding the trimmed
/// whole, so lyrics without recognized structure are never silently lost.
/// Empty or whitespace-only input yields zero sections.
pub fn split(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut start = 0;

    for marker in MARKER.find_iter(text) {
        push_trimmed(&mut sections, &text[start..marker.start()]);
        start = marker.end();
    }
    push_trimmed(&mut sections, &text[start..]);

    sections
}

fn push_trimmed(sections: &mut Vec<Section>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sections.push(Section::new(trimmed));
    }
}
