//! Record formatting: assemble the fixed-structure Markdown for one document.
//!
//! A pure function — catalog entry in, Markdown string out. The structure is
//! a constant template; the only conditional parts are the `preview:` header
//! line (present only when a PNG was actually rendered) and the authors line
//! (scraped names when available, catalog organization otherwise). Nothing
//! here reads the clock or the filesystem, so re-running the formatter on
//! identical inputs always yields byte-identical records.

use crate::catalog::CatalogEntry;
use crate::pipeline::classify::{
    hndl_narrative, identity_narrative, signature_narrative, RiskAssessment,
};

/// Everything the formatter needs for one record.
#[derive(Debug)]
pub struct RecordParts<'a> {
    pub entry: &'a CatalogEntry,
    /// Join key and output file name.
    pub stem: &'a str,
    /// Scraped authors; empty for PDFs and author-less HTML.
    pub authors: &'a [String],
    pub risk: RiskAssessment,
    /// Long-form description excerpt (typically 600 words).
    pub long_excerpt: &'a str,
    /// Short trailing excerpt (typically 80 words).
    pub short_excerpt: &'a str,
    /// Whether `<stem>.png` exists for this document.
    pub has_preview: bool,
}

/// Render the full Markdown record.
pub fn render_record(parts: &RecordParts<'_>) -> String {
    let e = parts.entry;
    let mut md = String::with_capacity(2048);

    // ── Header block ─────────────────────────────────────────────────────
    md.push_str("---\n");
    md.push_str(&format!("reference_id: {}\n", e.reference_id));
    md.push_str(&format!("document_type: {}\n", e.document_type));
    md.push_str(&format!("document_status: {}\n", e.document_status));
    md.push_str(&format!("date_published: {}\n", e.initial_publication_date));
    md.push_str(&format!("date_updated: {}\n", e.last_update_date));
    md.push_str(&format!("region: {}\n", e.region_scope));
    md.push_str(&format!("migration_urgency: {}\n", e.migration_urgency));
    md.push_str(&format!("local_file: {}\n", e.local_file));
    if parts.has_preview {
        md.push_str(&format!("preview: {}.png\n", parts.stem));
    }
    md.push_str("---\n\n");

    md.push_str(&format!("# {}\n\n", e.document_title));

    // ── Authors ──────────────────────────────────────────────────────────
    md.push_str("## Authors & Organization\n");
    if parts.authors.is_empty() {
        md.push_str(&format!("**Organization:** {}\n\n", e.authors_or_organization));
    } else {
        md.push_str(&format!("**Authors:** {}\n\n", parts.authors.join(", ")));
    }

    // ── Scope ────────────────────────────────────────────────────────────
    md.push_str("## Scope\n");
    md.push_str(&format!("**Industries:** {}\n", e.applicable_industries));
    md.push_str(&format!("**Region:** {}\n", e.region_scope));
    md.push_str(&format!("**Document type:** {}\n\n", e.document_type));

    // ── PQC relevance ────────────────────────────────────────────────────
    md.push_str("## How It Relates to PQC\n");
    md.push_str(&format!("{}\n\n", e.protocol_or_tool_impact));
    md.push_str(&format!("**Dependencies:** {}\n\n", e.dependencies));

    // ── Risk profile ─────────────────────────────────────────────────────
    md.push_str("## Risk Profile\n");
    md.push_str(&format!("**Migration urgency:** {}\n\n", e.migration_urgency));
    md.push_str(&format!("{}\n\n", hndl_narrative(parts.risk.hndl)));
    md.push_str(&format!("{}\n\n", identity_narrative(parts.risk.identity)));
    md.push_str(&format!("{}\n\n", signature_narrative(parts.risk.signatures)));

    // ── Mechanism table ──────────────────────────────────────────────────
    md.push_str("## PQC Key Types & Mechanisms\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Algorithm family | {} |\n", e.algorithm_family));
    md.push_str(&format!("| Security levels | {} |\n", e.security_levels));
    md.push_str(&format!(
        "| Protocol / tool impact | {} |\n",
        e.protocol_or_tool_impact
    ));
    md.push_str(&format!("| Toolchain support | {} |\n\n", e.toolchain_support));

    // ── Descriptions ─────────────────────────────────────────────────────
    md.push_str("## Description\n");
    md.push_str(&format!("{}\n\n", e.short_description));

    md.push_str("## Extended Description\n");
    md.push_str(&format!("{}\n\n", parts.long_excerpt));

    md.push_str("---\n\n");
    md.push_str(&format!("*{}*\n", parts.short_excerpt));

    md
}
