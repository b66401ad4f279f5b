//! Paragraph construction: split extracted text after sentence punctuation.
//!
//! The rule is deliberately naive. A boundary is placed after every `.`, `!`
//! or `?` that is followed by at least one ASCII space; the mark stays with
//! the fragment before it and the run of spaces is consumed. Nothing else is
//! a boundary: newlines and tabs are kept inside fragments, and "Mr. Smith",
//! "3. 5" or `"Stop!" she said` all split where a reader would not. Output
//! compatibility depends on reproducing exactly this behaviour.

use crate::pipeline::docx::is_encodable;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Turns a block of text into ordered paragraph strings.
pub trait ParagraphSplitter {
    /// Split `text` into raw fragments, before any filtering.
    fn fragments<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Fragments that are non-empty after trimming, trimmed, in order.
    ///
    /// Characters a DOCX cannot carry are removed first, so a fragment made
    /// only of control characters is dropped rather than written empty.
    fn paragraphs(&self, text: &str) -> Vec<String> {
        self.fragments(text)
            .into_iter()
            .map(strip_unencodable)
            .filter_map(|f| {
                let trimmed = f.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect()
    }
}

fn strip_unencodable(fragment: &str) -> Cow<'_, str> {
    if fragment.chars().all(is_encodable) {
        Cow::Borrowed(fragment)
    } else {
        Cow::Owned(fragment.chars().filter(|&c| is_encodable(c)).collect())
    }
}

// A terminator followed by one or more spaces. Only U+0020 counts.
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?] +").unwrap());

/// The default splitter: break after `.`, `!`, `?` followed by spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSplitter;

impl ParagraphSplitter for PunctuationSplitter {
    fn fragments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut fragments = Vec::new();
        let mut start = 0;
        for m in RE_SENTENCE_END.find_iter(text) {
            // The terminator is one ASCII byte and stays with this fragment.
            fragments.push(&text[start..m.start() + 1]);
            start = m.end();
        }
        fragments.push(&text[start..]);
        fragments
    }
}

/// Split `text` into paragraphs with the default [`PunctuationSplitter`].
pub fn build_paragraphs(text: &str) -> Vec<String> {
    PunctuationSplitter.paragraphs(text)
}
