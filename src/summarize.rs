//! The driver: one full pass over the library.
//!
//! Enumerates every `.pdf` and `.html` in the library directory
//! (lexicographic within kind, PDFs before HTMLs), joins each to its
//! catalog row by stem, and runs extract → classify → preview → format →
//! write for each. Strictly sequential: one document finishes before the
//! next starts, so the only shared state across files is the read-only
//! catalog map and the summary counters.
//!
//! There is no partial-run resumption — every invocation reprocesses every
//! file and overwrites outputs unconditionally. That makes an interrupted
//! run harmless: whatever it left half-written is replaced next time.

use crate::catalog::{self, CatalogEntry};
use crate::config::SummarizeConfig;
use crate::error::{FileError, SummarizeError};
use crate::output::{FileOutcome, RunSummary};
use crate::pipeline::{authors, classify, cleantext, extract, format, preview};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Run the whole pipeline once.
///
/// # Errors
/// Returns `Err(SummarizeError)` only for fatal preconditions — catalog or
/// library directory missing, unwritable output directory. Everything that
/// goes wrong per file is recorded in the returned [`RunSummary`] instead.
pub async fn run(config: &SummarizeConfig) -> Result<RunSummary, SummarizeError> {
    // ── Step 1: Fatal preconditions ──────────────────────────────────────
    if !config.catalog_path.exists() {
        return Err(SummarizeError::CatalogNotFound {
            path: config.catalog_path.clone(),
        });
    }
    if !config.library_dir.is_dir() {
        return Err(SummarizeError::LibraryDirNotFound {
            path: config.library_dir.clone(),
        });
    }

    // ── Step 2: Load the catalog ─────────────────────────────────────────
    let entries = catalog::load_catalog(&config.catalog_path)?;

    // ── Step 3: Enumerate documents ──────────────────────────────────────
    let files = list_documents(&config.library_dir)?;
    let pdf_count = files
        .iter()
        .filter(|(_, k)| *k == extract::DocumentKind::Pdf)
        .count();
    info!(
        "Processing {} files ({} PDFs, {} HTMLs)",
        files.len(),
        pdf_count,
        files.len() - pdf_count
    );

    let output_dir = config.effective_output_dir().clone();
    std::fs::create_dir_all(&output_dir).map_err(|e| {
        SummarizeError::Internal(format!(
            "cannot create output directory '{}': {e}",
            output_dir.display()
        ))
    })?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(files.len());
    }

    // ── Step 4: Process each document ────────────────────────────────────
    let mut summary = RunSummary {
        total_files: files.len(),
        ..RunSummary::default()
    };

    for (i, (path, kind)) in files.iter().enumerate() {
        let index = i + 1;
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s.to_string(),
            None => continue,
        };

        let Some(entry) = entries.get(&stem) else {
            warn!("{}: no catalog entry found, skipping", stem);
            summary.skipped += 1;
            if let Some(ref cb) = config.progress_callback {
                cb.on_file_skipped(&stem, index, files.len());
            }
            continue;
        };

        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(&stem, index, files.len());
        }

        let outcome =
            process_document(path, *kind, &stem, entry, &output_dir, config, &mut summary).await;

        match outcome {
            FileOutcome::Written { preview } => {
                summary.records_written += 1;
                if preview {
                    summary.previews_written += 1;
                }
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_complete(&stem, index, files.len(), preview);
                }
            }
            FileOutcome::Failed => {
                if let Some(ref cb) = config.progress_callback {
                    let last = summary
                        .errors
                        .last()
                        .map(|e| e.to_string())
                        .unwrap_or_default();
                    cb.on_file_error(&stem, index, files.len(), &last);
                }
            }
            // process_document never skips; catalog misses are handled above.
            FileOutcome::SkippedNoCatalogEntry => {}
        }
    }

    info!(
        "Run complete: {} records, {} previews, {} skipped, {} errors",
        summary.records_written,
        summary.previews_written,
        summary.skipped,
        summary.errors.len()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(summary.records_written, summary.previews_written);
    }

    Ok(summary)
}

/// One document, start to finish. Recoverable trouble lands in `summary.errors`.
async fn process_document(
    path: &Path,
    kind: extract::DocumentKind,
    stem: &str,
    entry: &CatalogEntry,
    output_dir: &Path,
    config: &SummarizeConfig,
    summary: &mut RunSummary,
) -> FileOutcome {
    // Extraction soft-fails to empty text; the record is built regardless.
    let extraction = extract::extract_text(path, kind, config).await;
    if let Some(reason) = extraction.failure() {
        summary.errors.push(FileError::ExtractionFailed {
            stem: stem.to_string(),
            reason: reason.to_string(),
        });
    }

    let author_names = match kind {
        extract::DocumentKind::Html => authors::scrape_authors(path, config.author_scan_bytes),
        extract::DocumentKind::Pdf => Vec::new(),
    };

    let risk = classify::assess(entry, extraction.text());
    let long_excerpt = cleantext::excerpt(extraction.text(), config.long_excerpt_words);
    let short_excerpt = cleantext::excerpt(extraction.text(), config.short_excerpt_words);

    // Preview before formatting, so the header only references a PNG that
    // actually exists.
    let has_preview = match kind {
        extract::DocumentKind::Pdf if !config.skip_previews => {
            match preview::render_preview(path, stem, output_dir, config).await {
                Ok(_) => true,
                Err(reason) => {
                    warn!("{}: preview failed: {}", stem, reason);
                    summary.errors.push(FileError::PreviewFailed {
                        stem: stem.to_string(),
                        reason,
                    });
                    false
                }
            }
        }
        _ => false,
    };

    let record = format::render_record(&format::RecordParts {
        entry,
        stem,
        authors: &author_names,
        risk,
        long_excerpt: &long_excerpt,
        short_excerpt: &short_excerpt,
        has_preview,
    });

    let md_path = output_dir.join(format!("{stem}.md"));
    match tokio::fs::write(&md_path, &record).await {
        Ok(()) => {
            info!("{}.md written ({} bytes)", stem, record.len());
            FileOutcome::Written {
                preview: has_preview,
            }
        }
        Err(e) => {
            warn!("{}.md: write failed: {}", stem, e);
            summary.errors.push(FileError::WriteFailed {
                stem: stem.to_string(),
                reason: e.to_string(),
            });
            FileOutcome::Failed
        }
    }
}

/// Enumerate library documents: PDFs sorted by name, then HTMLs sorted by
/// name. The fixed order makes successive runs process (and log) files
/// identically.
fn list_documents(
    dir: &Path,
) -> Result<Vec<(PathBuf, extract::DocumentKind)>, SummarizeError> {
    let read = std::fs::read_dir(dir).map_err(|e| SummarizeError::LibraryDirUnreadable {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut pdfs: Vec<PathBuf> = Vec::new();
    let mut htmls: Vec<PathBuf> = Vec::new();
    for entry in read.filter_map(|e| e.ok()) {
        let path = entry.path();
        match extract::DocumentKind::from_path(&path) {
            Some(extract::DocumentKind::Pdf) => pdfs.push(path),
            Some(extract::DocumentKind::Html) => htmls.push(path),
            None => {}
        }
    }
    pdfs.sort();
    htmls.sort();

    let mut files: Vec<(PathBuf, extract::DocumentKind)> = Vec::with_capacity(
        pdfs.len() + htmls.len(),
    );
    files.extend(pdfs.into_iter().map(|p| (p, extract::DocumentKind::Pdf)));
    files.extend(htmls.into_iter().map(|p| (p, extract::DocumentKind::Html)));
    Ok(files)
}
