//! Pipeline stages for library summarisation.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and keeps the driver a plain
//! sequence of calls.
//!
//! ## Data Flow
//!
//! ```text
//! catalog row + document
//!        │
//!        ├─ extract   pdftotext / HTML tag stripping → raw text
//!        ├─ authors   citation_author metas (HTML only)
//!        ├─ classify  keyword containment → three risk verdicts
//!        ├─ cleantext boilerplate regexes + word-capped excerpts
//!        ├─ preview   pdftoppm page one → <stem>.png (PDF only)
//!        └─ format    fixed template → <stem>.md
//! ```
//!
//! 1. [`extract`]  — raw text per document, soft-failing to empty text
//! 2. [`authors`]  — ordered author names from citation metadata
//! 3. [`classify`] — the three-part risk profile, a pure function
//! 4. [`cleantext`] — deterministic cleanup feeding both excerpt lengths
//! 5. [`preview`]  — page-one PNG via pdftoppm, soft-failing
//! 6. [`format`]   — the record template, a pure function

pub mod authors;
pub mod classify;
pub mod cleantext;
pub mod extract;
pub mod format;
pub mod preview;
