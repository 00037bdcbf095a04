//! # pqlib2md
//!
//! Generate structured Markdown records and PNG previews for a library of
//! post-quantum-cryptography reference documents.
//!
//! ## Why this crate?
//!
//! A PQC-migration front-end serves a library of standards, advisories, and
//! papers. Each document needs a uniform card: catalog metadata, a
//! three-part quantum-risk profile, a readable excerpt, and (for PDFs) a
//! page-one preview image. Hand-writing those cards does not scale and
//! drifts out of sync with the catalog; this tool regenerates all of them
//! from one CSV plus the documents themselves, deterministically and for
//! free — no API calls, no network.
//!
//! ## Pipeline Overview
//!
//! ```text
//! catalog.csv ─▶ load      stem-keyed metadata map
//! documents/  ─▶ extract   pdftotext / HTML tag stripping (soft-fail)
//!                authors   citation_author metas (HTML only)
//!                classify  keyword containment → HNDL / identity / signature
//!                cleantext boilerplate regexes + 600/80-word excerpts
//!                preview   pdftoppm page one → <stem>.png (PDF only)
//!                format    fixed template → <stem>.md
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pqlib2md::{run, SummarizeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SummarizeConfig::builder()
//!         .catalog_path("src/data/library.csv")
//!         .library_dir("public/library")
//!         .build()?;
//!     let summary = run(&config).await?;
//!     println!(
//!         "{} records, {} previews, {} errors",
//!         summary.records_written,
//!         summary.previews_written,
//!         summary.errors.len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Two severities only. Fatal: catalog or library directory missing —
//! [`run`] returns an error before touching any document. Recoverable:
//! everything per-file — extraction trouble degrades to an empty excerpt,
//! preview trouble drops the preview line, write trouble is recorded and
//! the run moves on. The returned [`RunSummary`] is the complete report.
//!
//! ## External tools
//!
//! PDF handling shells out to poppler (`pdftotext`, `pdftoppm`), each call
//! bounded by a timeout. Absent tools degrade exactly like failed ones —
//! records are still written from catalog metadata alone.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod summarize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use catalog::{load_catalog, CatalogEntry};
pub use config::{SummarizeConfig, SummarizeConfigBuilder};
pub use error::{FileError, SummarizeError};
pub use output::{FileOutcome, RunSummary};
pub use pipeline::classify::{RiskAssessment, RiskVerdict};
pub use pipeline::extract::{DocumentKind, Extraction};
pub use progress::{NoopProgressCallback, ProgressCallback, RunProgressCallback};
pub use summarize::run;
