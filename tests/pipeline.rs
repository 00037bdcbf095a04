//! End-to-end tests for the summarisation pipeline.
//!
//! These run entirely on temp-directory fixtures: a small catalog CSV plus
//! hand-written HTML documents, and deliberately broken PDFs to exercise the
//! soft-failure paths. No test depends on poppler being installed — an
//! absent `pdftotext`/`pdftoppm` behaves exactly like a failing one, which
//! is itself the behaviour under test.

use pqlib2md::{run, FileOutcome, SummarizeConfig, SummarizeError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ── Fixtures ─────────────────────────────────────────────────────────────────

const CATALOG_HEADER: &str = "reference_id,document_title,document_type,document_status,\
initial_publication_date,last_update_date,region_scope,MigrationUrgency,\
authors_or_organization,applicable_industries,AlgorithmFamily,SecurityLevels,\
ProtocolOrToolImpact,ToolchainSupport,short_description,dependencies,local_file\n";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    fn library(&self) -> std::path::PathBuf {
        let d = self.dir.path().join("library");
        fs::create_dir_all(&d).unwrap();
        d
    }

    fn write_catalog(&self, rows: &[&str]) -> std::path::PathBuf {
        let path = self.dir.path().join("library.csv");
        let mut csv = String::from(CATALOG_HEADER);
        for row in rows {
            csv.push_str(row);
            csv.push('\n');
        }
        fs::write(&path, csv).unwrap();
        path
    }

    fn write_doc(&self, name: &str, content: &str) {
        fs::write(self.library().join(name), content).unwrap();
    }

    fn config(&self, catalog: &Path) -> SummarizeConfig {
        SummarizeConfig::builder()
            .catalog_path(catalog)
            .library_dir(self.library())
            .build()
            .unwrap()
    }
}

fn row(reference_id: &str, title: &str, local_file: &str) -> String {
    format!(
        "{reference_id},{title},Standard,Final,2024-08-13,2024-08-13,US,High,NIST,All,\
         ML-KEM,\"1,3,5\",TLS 1.3 key exchange,OpenSSL 3.5,Specifies the scheme.,FIPS 202,{local_file}"
    )
}

// ── Fatal preconditions ──────────────────────────────────────────────────────

#[tokio::test]
async fn missing_catalog_is_fatal() {
    let fx = Fixture::new();
    let config = SummarizeConfig::builder()
        .catalog_path(fx.dir.path().join("absent.csv"))
        .library_dir(fx.library())
        .build()
        .unwrap();
    let err = run(&config).await.unwrap_err();
    assert!(matches!(err, SummarizeError::CatalogNotFound { .. }));
}

#[tokio::test]
async fn missing_library_dir_is_fatal() {
    let fx = Fixture::new();
    let catalog = fx.write_catalog(&[]);
    let config = SummarizeConfig::builder()
        .catalog_path(catalog)
        .library_dir(fx.dir.path().join("absent"))
        .build()
        .unwrap();
    let err = run(&config).await.unwrap_err();
    assert!(matches!(err, SummarizeError::LibraryDirNotFound { .. }));
}

// ── The happy HTML path ──────────────────────────────────────────────────────

#[tokio::test]
async fn html_document_produces_record_without_preview() {
    let fx = Fixture::new();
    let catalog = fx.write_catalog(&[&row("RFC-9370", "ML-KEM in IKEv2", "lib/rfc9370.html")]);
    fx.write_doc(
        "rfc9370.html",
        "<html><body><p>Hybrid key encapsulation for IKEv2.</p></body></html>",
    );

    let summary = run(&fx.config(&catalog)).await.unwrap();
    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.previews_written, 0);
    assert_eq!(summary.skipped, 0);
    assert!(summary.errors.is_empty());

    let md = fs::read_to_string(fx.library().join("rfc9370.md")).unwrap();
    assert!(md.contains("# ML-KEM in IKEv2"));
    assert!(md.contains("reference_id: RFC-9370"));
    // HTML documents never get a preview reference.
    assert!(!md.contains("preview:"));
    // "key encapsulation" in the text makes HNDL high risk.
    assert!(md.contains("**Harvest-now / decrypt-later:** High risk"));
    assert!(!fx.library().join("rfc9370.png").exists());
}

#[tokio::test]
async fn citation_authors_override_the_organization_field() {
    let fx = Fixture::new();
    let catalog = fx.write_catalog(&[&row("EPRINT-634", "Kyber Paper", "lib/kyber.html")]);
    fx.write_doc(
        "kyber.html",
        r#"<html><head>
            <meta name="citation_author" content="Joppe Bos">
            <meta name="citation_author" content="Léo Ducas">
        </head><body>CRYSTALS-Kyber: module-lattice KEM.</body></html>"#,
    );

    let summary = run(&fx.config(&catalog)).await.unwrap();
    assert_eq!(summary.records_written, 1);

    let md = fs::read_to_string(fx.library().join("kyber.md")).unwrap();
    assert!(md.contains("**Authors:** Joppe Bos, Léo Ducas"));
    assert!(!md.contains("**Organization:**"));
}

// ── Join-key edge cases ──────────────────────────────────────────────────────

#[tokio::test]
async fn document_without_catalog_row_is_skipped_not_an_error() {
    let fx = Fixture::new();
    let catalog = fx.write_catalog(&[&row("RFC-9370", "ML-KEM in IKEv2", "lib/rfc9370.html")]);
    fx.write_doc("rfc9370.html", "<p>catalogued</p>");
    fx.write_doc("orphan.html", "<p>no catalog row</p>");

    let summary = run(&fx.config(&catalog)).await.unwrap();
    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.skipped, 1);
    assert!(summary.errors.is_empty());
    assert!(!fx.library().join("orphan.md").exists());
}

#[tokio::test]
async fn catalog_row_without_document_produces_no_output() {
    let fx = Fixture::new();
    let catalog = fx.write_catalog(&[
        &row("RFC-9370", "ML-KEM in IKEv2", "lib/rfc9370.html"),
        &row("GHOST-1", "Never Downloaded", "lib/ghost.pdf"),
    ]);
    fx.write_doc("rfc9370.html", "<p>present</p>");

    let summary = run(&fx.config(&catalog)).await.unwrap();
    assert_eq!(summary.records_written, 1);
    assert!(!fx.library().join("ghost.md").exists());
    assert!(!fx.library().join("ghost.png").exists());
}

// ── PDF soft-failure path ────────────────────────────────────────────────────

#[tokio::test]
async fn broken_pdf_still_produces_a_record_but_no_preview() {
    let fx = Fixture::new();
    let catalog = fx.write_catalog(&[&row("NIST-FIPS-203", "ML-KEM Standard", "lib/FIPS_203.pdf")]);
    fx.write_doc("FIPS_203.pdf", "this is not a pdf");

    let summary = run(&fx.config(&catalog)).await.unwrap();
    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.previews_written, 0);
    // Extraction and preview both failed, both recoverable.
    assert!(!summary.errors.is_empty());

    let md = fs::read_to_string(fx.library().join("FIPS_203.md")).unwrap();
    assert!(!md.is_empty());
    assert!(md.contains("# ML-KEM Standard"));
    // Catalog fields still classify it even with empty extracted text.
    assert!(md.contains("**Harvest-now / decrypt-later:** High risk"));
    // Empty extraction → empty extended description, and no preview header.
    assert!(md.contains("## Extended Description\n\n"));
    assert!(!md.contains("preview:"));
    assert!(!fx.library().join("FIPS_203.png").exists());
}

// ── Determinism ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn two_runs_produce_byte_identical_records() {
    let fx = Fixture::new();
    let catalog = fx.write_catalog(&[
        &row("RFC-9370", "ML-KEM in IKEv2", "lib/rfc9370.html"),
        &row("EPRINT-634", "Kyber Paper", "lib/kyber.html"),
    ]);
    fx.write_doc("rfc9370.html", "<p>Hybrid key exchange with ML-KEM.</p>");
    fx.write_doc("kyber.html", "<p>Module-lattice KEM with Dilithium signatures.</p>");

    let config = fx.config(&catalog);
    run(&config).await.unwrap();
    let first: Vec<(String, Vec<u8>)> = ["rfc9370.md", "kyber.md"]
        .iter()
        .map(|n| (n.to_string(), fs::read(fx.library().join(n)).unwrap()))
        .collect();

    run(&config).await.unwrap();
    for (name, bytes) in &first {
        let again = fs::read(fx.library().join(name)).unwrap();
        assert_eq!(&again, bytes, "{name} changed between runs");
    }
}

// ── Output redirection ───────────────────────────────────────────────────────

#[tokio::test]
async fn output_dir_redirects_records_away_from_sources() {
    let fx = Fixture::new();
    let catalog = fx.write_catalog(&[&row("RFC-9370", "ML-KEM in IKEv2", "lib/rfc9370.html")]);
    fx.write_doc("rfc9370.html", "<p>redirected</p>");
    let out = fx.dir.path().join("out");

    let config = SummarizeConfig::builder()
        .catalog_path(&catalog)
        .library_dir(fx.library())
        .output_dir(&out)
        .build()
        .unwrap();

    let summary = run(&config).await.unwrap();
    assert_eq!(summary.records_written, 1);
    assert!(out.join("rfc9370.md").exists());
    assert!(!fx.library().join("rfc9370.md").exists());
}

// ── Outcome type sanity ──────────────────────────────────────────────────────

#[test]
fn file_outcome_equality() {
    assert_eq!(
        FileOutcome::Written { preview: true },
        FileOutcome::Written { preview: true }
    );
    assert_ne!(
        FileOutcome::Written { preview: false },
        FileOutcome::SkippedNoCatalogEntry
    );
}
