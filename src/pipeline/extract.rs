//! Text extraction: raw text per document, polymorphic over document kind.
//!
//! ## Why a result enum instead of `Result`?
//!
//! Extraction failure is not an error to the pipeline — a document whose
//! text cannot be read still gets a record built from its catalog metadata.
//! [`Extraction`] makes that explicit: the driver branches on
//! `Text` / `Failed` instead of relying on error propagation, and `Failed`
//! carries the reason purely for the run summary. A single attempt per file,
//! no retries, never fatal.
//!
//! ## Why shell out to pdftotext?
//!
//! The previews already require poppler (`pdftoppm`), so `pdftotext` is
//! guaranteed to be co-installed, and text-layer extraction is all the
//! classifier needs — no layout fidelity required. Running it as a child
//! process also gives a hard isolation boundary: a crash or hang on one
//! malformed PDF is contained by the timeout and cannot take the run down.

use crate::config::SummarizeConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// The two document kinds the library holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Html,
}

impl DocumentKind {
    /// Classify a path by extension (case-insensitive). `None` for anything
    /// that is not a library document.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "html" => Some(DocumentKind::Html),
            _ => None,
        }
    }
}

/// Outcome of one extraction attempt.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// Extracted text; may legitimately be empty (blank or image-only pages).
    Text(String),
    /// The attempt failed; the pipeline proceeds with empty text.
    Failed { reason: String },
}

impl Extraction {
    /// The extracted text, or `""` when extraction failed.
    pub fn text(&self) -> &str {
        match self {
            Extraction::Text(t) => t,
            Extraction::Failed { .. } => "",
        }
    }

    /// The failure reason, when there is one.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Extraction::Text(_) => None,
            Extraction::Failed { reason } => Some(reason),
        }
    }
}

/// Extract raw text from a document, dispatching on kind.
pub async fn extract_text(
    path: &Path,
    kind: DocumentKind,
    config: &SummarizeConfig,
) -> Extraction {
    let result = match kind {
        DocumentKind::Pdf => extract_pdf(path, config).await,
        DocumentKind::Html => extract_html(path, config),
    };
    if let Extraction::Failed { reason } = &result {
        warn!("Extraction failed for {}: {}", path.display(), reason);
    }
    result
}

/// Run `pdftotext <path> -` under the configured timeout and keep at most
/// `max_pdf_lines` lines of its stdout.
async fn extract_pdf(path: &Path, config: &SummarizeConfig) -> Extraction {
    let output = Command::new("pdftotext")
        .arg(path)
        .arg("-")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match timeout(Duration::from_secs(config.pdf_timeout_secs), output).await {
        Err(_) => {
            return Extraction::Failed {
                reason: format!("pdftotext timed out after {}s", config.pdf_timeout_secs),
            }
        }
        Ok(Err(e)) => {
            return Extraction::Failed {
                reason: format!("failed to run pdftotext: {e}"),
            }
        }
        Ok(Ok(out)) => out,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Extraction::Failed {
            reason: format!(
                "pdftotext exited with {}: {}",
                output.status,
                stderr.trim()
            ),
        };
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let text: String = stdout
        .lines()
        .take(config.max_pdf_lines)
        .collect::<Vec<_>>()
        .join("\n");
    debug!("pdftotext: {} chars from {}", text.len(), path.display());
    Extraction::Text(text)
}

// Tags whose content is markup plumbing, not document text.
static RE_SKIP_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)\b[^>]*>.*?</(script|style|noscript)>").unwrap()
});
static RE_COMMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Read an HTML file and reduce it to its text nodes, joined by spaces and
/// truncated to `max_html_chars`.
fn extract_html(path: &Path, config: &SummarizeConfig) -> Extraction {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            return Extraction::Failed {
                reason: format!("failed to read HTML: {e}"),
            }
        }
    };
    // Lossy: library HTML snapshots occasionally carry latin-1 fragments.
    let html = String::from_utf8_lossy(&bytes);
    Extraction::Text(strip_html_text(&html, config.max_html_chars))
}

/// Drop script/style/noscript content, comments, and every remaining tag,
/// then collapse text runs with single spaces and cap the length.
pub fn strip_html_text(html: &str, max_chars: usize) -> String {
    let stripped = RE_SKIP_BLOCKS.replace_all(html, " ");
    let stripped = RE_COMMENTS.replace_all(&stripped, " ");
    let stripped = RE_TAGS.replace_all(&stripped, " ");
    let text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&text, max_chars)
}

/// Truncate to at most `max_chars` characters, respecting char boundaries.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
