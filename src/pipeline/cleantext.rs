//! Deterministic text cleanup and word-capped excerpts.
//!
//! Extracted text arrives full of artefacts that are faithful to the source
//! but useless in a record: hard-wrapped lines, "Page 3 of 97" footers,
//! copyright tails, and the e-mail addresses standards bodies print on
//! every title page. This module applies a fixed, ordered list of cheap
//! regex rules and nothing else — no scoring, no heuristics — so cleaning
//! is idempotent and two runs over the same input are byte-identical.
//!
//! ## Rule order
//!
//! Whitespace is collapsed first so the boilerplate patterns see
//! single-spaced text, and collapsed again afterwards to close the gaps
//! the removals leave behind.

use once_cell::sync::Lazy;
use regex::Regex;

// Ordered boilerplate patterns. Case-insensitive throughout.
static BOILERPLATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Leading CONFIDENTIAL / DRAFT banners.
        r"(?i)^\s*confidential\s*",
        r"(?i)^\s*draft\s*",
        // E-mail addresses.
        r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b",
        // Copyright tails: © up to end of sentence-ish run.
        r"©[^.]*\.?",
        // "page N of M" footers.
        r"(?i)page\s+\d+\s+of\s+\d+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Collapse whitespace, strip boilerplate, collapse again.
///
/// Idempotent: `clean_text(clean_text(s)) == clean_text(s)`.
pub fn clean_text(text: &str) -> String {
    let mut s = collapse_whitespace(text);
    for re in BOILERPLATE.iter() {
        s = re.replace_all(&s, " ").into_owned();
    }
    collapse_whitespace(&s)
}

/// Clean and cap at `max_words` words. Returns the full cleaned text when
/// it is already within the cap.
pub fn excerpt(text: &str, max_words: usize) -> String {
    let cleaned = clean_text(text);
    let words: Vec<&str> = cleaned.split_whitespace().take(max_words).collect();
    words.join(" ")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
