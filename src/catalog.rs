//! Catalog loader: the CSV of reference metadata, keyed by file-name stem.
//!
//! One row per library document. The `local_file` column (for example
//! `public/library/FIPS_203.pdf`) joins the row to the on-disk document via
//! its stem (`FIPS_203`), which is also the name every output file takes.
//!
//! Column completeness is deliberately not validated: the catalog is
//! hand-maintained and grows columns over time, so a missing column
//! deserialises to an empty string and degrades at use time (an empty
//! section in the record) rather than failing the run.

use crate::error::SummarizeError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// One row of the library catalog.
///
/// Field names follow the CSV header exactly (the catalog mixes snake_case
/// and PascalCase headers; `serde(rename)` bridges the difference). Every
/// field defaults to an empty string so the loader accepts any subset of
/// columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub reference_id: String,
    #[serde(default)]
    pub document_title: String,
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub document_status: String,
    #[serde(default)]
    pub initial_publication_date: String,
    #[serde(default)]
    pub last_update_date: String,
    #[serde(default)]
    pub region_scope: String,
    #[serde(default, rename = "MigrationUrgency")]
    pub migration_urgency: String,
    #[serde(default)]
    pub authors_or_organization: String,
    #[serde(default)]
    pub applicable_industries: String,
    #[serde(default, rename = "AlgorithmFamily")]
    pub algorithm_family: String,
    #[serde(default, rename = "SecurityLevels")]
    pub security_levels: String,
    #[serde(default, rename = "ProtocolOrToolImpact")]
    pub protocol_or_tool_impact: String,
    #[serde(default, rename = "ToolchainSupport")]
    pub toolchain_support: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub dependencies: String,
    #[serde(default)]
    pub local_file: String,
}

impl CatalogEntry {
    /// Trim surrounding whitespace from every field in place.
    ///
    /// The catalog is edited by hand and in spreadsheets; stray spaces in
    /// cells would otherwise leak into headers and the stem join key.
    fn trim(&mut self) {
        for field in [
            &mut self.reference_id,
            &mut self.document_title,
            &mut self.document_type,
            &mut self.document_status,
            &mut self.initial_publication_date,
            &mut self.last_update_date,
            &mut self.region_scope,
            &mut self.migration_urgency,
            &mut self.authors_or_organization,
            &mut self.applicable_industries,
            &mut self.algorithm_family,
            &mut self.security_levels,
            &mut self.protocol_or_tool_impact,
            &mut self.toolchain_support,
            &mut self.short_description,
            &mut self.dependencies,
            &mut self.local_file,
        ] {
            if field.trim().len() != field.len() {
                *field = field.trim().to_string();
            }
        }
    }

    /// The join key: file-name stem of `local_file`, if it has one.
    pub fn stem(&self) -> Option<String> {
        Path::new(&self.local_file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
    }
}

/// Load the catalog CSV into a stem → entry map.
///
/// Rows with an empty `local_file` have no on-disk counterpart and are
/// ignored. Rows that fail to deserialise are skipped with a debug log
/// rather than aborting the run; a whole-file read error is fatal.
/// Duplicate stems keep the last row, matching how the catalog is curated
/// (later rows supersede earlier ones).
pub fn load_catalog(path: &Path) -> Result<HashMap<String, CatalogEntry>, SummarizeError> {
    if !path.exists() {
        return Err(SummarizeError::CatalogNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader =
        csv::Reader::from_path(path).map_err(|e| SummarizeError::CatalogUnreadable {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let mut entries: HashMap<String, CatalogEntry> = HashMap::new();
    for (i, result) in reader.deserialize::<CatalogEntry>().enumerate() {
        let mut entry = match result {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping malformed catalog row {}: {}", i + 2, e);
                continue;
            }
        };
        entry.trim();
        if entry.local_file.is_empty() {
            continue;
        }
        if let Some(stem) = entry.stem() {
            entries.insert(stem, entry);
        }
    }

    info!("Loaded {} catalog entries from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_rows_keyed_by_stem() {
        let f = write_csv(
            "reference_id,document_title,local_file\n\
             NIST-203,ML-KEM Standard,public/library/FIPS_203.pdf\n\
             NIST-204,ML-DSA Standard,public/library/FIPS_204.pdf\n",
        );
        let map = load_catalog(f.path()).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["FIPS_203"].reference_id, "NIST-203");
        assert_eq!(map["FIPS_204"].document_title, "ML-DSA Standard");
    }

    #[test]
    fn missing_columns_default_to_empty() {
        let f = write_csv("local_file\npublic/library/doc.pdf\n");
        let map = load_catalog(f.path()).unwrap();
        let entry = &map["doc"];
        assert_eq!(entry.reference_id, "");
        assert_eq!(entry.algorithm_family, "");
        assert_eq!(entry.local_file, "public/library/doc.pdf");
    }

    #[test]
    fn pascal_case_headers_map_to_fields() {
        let f = write_csv(
            "local_file,MigrationUrgency,AlgorithmFamily,SecurityLevels,ProtocolOrToolImpact,ToolchainSupport\n\
             lib/FIPS_203.pdf,High,ML-KEM,\"1,3,5\",TLS 1.3 key exchange,OpenSSL 3.5+\n",
        );
        let map = load_catalog(f.path()).unwrap();
        let entry = &map["FIPS_203"];
        assert_eq!(entry.migration_urgency, "High");
        assert_eq!(entry.algorithm_family, "ML-KEM");
        assert_eq!(entry.security_levels, "1,3,5");
        assert_eq!(entry.protocol_or_tool_impact, "TLS 1.3 key exchange");
        assert_eq!(entry.toolchain_support, "OpenSSL 3.5+");
    }

    #[test]
    fn rows_without_local_file_are_ignored() {
        let f = write_csv(
            "reference_id,local_file\n\
             HAS-FILE,lib/a.pdf\n\
             NO-FILE,\n",
        );
        let map = load_catalog(f.path()).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("a"));
    }

    #[test]
    fn fields_are_trimmed() {
        let f = write_csv("reference_id,local_file\n  NIST-203  , lib/FIPS_203.pdf \n");
        let map = load_catalog(f.path()).unwrap();
        assert_eq!(map["FIPS_203"].reference_id, "NIST-203");
    }

    #[test]
    fn duplicate_stems_keep_last_row() {
        let f = write_csv(
            "reference_id,local_file\n\
             OLD,lib/doc.pdf\n\
             NEW,lib/doc.pdf\n",
        );
        let map = load_catalog(f.path()).unwrap();
        assert_eq!(map["doc"].reference_id, "NEW");
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_catalog(Path::new("/nonexistent/library.csv")).unwrap_err();
        assert!(matches!(err, SummarizeError::CatalogNotFound { .. }));
    }
}
