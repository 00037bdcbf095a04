//! CLI binary for pqlib2md.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SummarizeConfig`, renders a progress bar, and prints the run summary.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pqlib2md::{run, ProgressCallback, RunProgressCallback, RunSummary, SummarizeConfig};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar across the run with a per-file log
/// line above it.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        bar.set_style(style);
        bar.set_prefix("Summarising");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl RunProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
    }

    fn on_file_start(&self, stem: &str, _index: usize, _total: usize) {
        self.bar.set_message(stem.to_string());
    }

    fn on_file_complete(&self, stem: &str, _index: usize, _total: usize, preview: bool) {
        let preview_mark = if preview {
            dim("+png")
        } else {
            String::new()
        };
        self.bar
            .println(format!("  {} {}.md {}", green("✓"), stem, preview_mark));
        self.bar.inc(1);
    }

    fn on_file_skipped(&self, stem: &str, _index: usize, _total: usize) {
        self.bar.println(format!(
            "  {} {}: no catalog entry",
            yellow("⚠"),
            stem
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, stem: &str, _index: usize, _total: usize, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 80 {
            format!("{}…", &error[..79])
        } else {
            error.to_string()
        };
        self.bar
            .println(format!("  {} {}: {}", red("✗"), stem, red(&msg)));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, _records: usize, _previews: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Regenerate every record and preview in place
  pqlib2md --catalog src/data/library.csv --library public/library

  # Redirect outputs, skip PNG rendering
  pqlib2md --catalog library.csv --library docs/ --output-dir out/ --no-preview

  # Machine-readable run summary
  pqlib2md --catalog library.csv --library docs/ --json > summary.json

REQUIRED EXTERNAL TOOLS (PDFs only):
  pdftotext, pdftoppm — both ship with poppler-utils. When absent, records
  are still written from catalog metadata; previews and PDF excerpts are
  simply omitted and reported in the summary.

OUTPUTS:
  <stem>.md   one record per document with a matching catalog row
  <stem>.png  page-one preview, PDFs only

EXIT STATUS:
  0  run completed (individual per-file errors are reported, not fatal)
  1  catalog CSV or library directory missing, or invalid flags
"#;

/// Generate Markdown records and PNG previews for a PQC reference library.
#[derive(Parser, Debug)]
#[command(
    name = "pqlib2md",
    version,
    about = "Generate Markdown records and PNG previews for a PQC reference library",
    long_about = "Reads a metadata CSV and a directory of PDF/HTML documents, and writes one \
structured Markdown record per document (plus a page-one PNG preview per PDF). Deterministic, \
sequential, no network.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the catalog CSV (keyed by the local_file column).
    #[arg(long, env = "PQLIB2MD_CATALOG")]
    catalog: PathBuf,

    /// Directory containing the .pdf and .html documents.
    #[arg(long, env = "PQLIB2MD_LIBRARY")]
    library: PathBuf,

    /// Write records and previews here instead of alongside the sources.
    #[arg(short, long, env = "PQLIB2MD_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Timeout for one pdftotext invocation, in seconds.
    #[arg(long, env = "PQLIB2MD_PDF_TIMEOUT", default_value_t = 20)]
    pdf_timeout: u64,

    /// Timeout for one pdftoppm invocation, in seconds.
    #[arg(long, env = "PQLIB2MD_PNG_TIMEOUT", default_value_t = 15)]
    png_timeout: u64,

    /// Preview rendering resolution (DPI).
    #[arg(long, env = "PQLIB2MD_DPI", default_value_t = 150,
          value_parser = clap::value_parser!(u32).range(36..=600))]
    dpi: u32,

    /// Word cap for the long-form description excerpt.
    #[arg(long, env = "PQLIB2MD_LONG_WORDS", default_value_t = 600)]
    long_words: usize,

    /// Word cap for the short trailing excerpt.
    #[arg(long, env = "PQLIB2MD_SHORT_WORDS", default_value_t = 80)]
    short_words: usize,

    /// Skip PNG preview rendering entirely.
    #[arg(long, env = "PQLIB2MD_NO_PREVIEW")]
    no_preview: bool,

    /// Output the run summary as JSON on stdout.
    #[arg(long, env = "PQLIB2MD_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PQLIB2MD_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PQLIB2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PQLIB2MD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn RunProgressCallback>)
    } else {
        None
    };

    let mut builder = SummarizeConfig::builder()
        .catalog_path(&cli.catalog)
        .library_dir(&cli.library)
        .pdf_timeout_secs(cli.pdf_timeout)
        .png_timeout_secs(cli.png_timeout)
        .preview_dpi(cli.dpi)
        .long_excerpt_words(cli.long_words)
        .short_excerpt_words(cli.short_words)
        .skip_previews(cli.no_preview);

    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run ──────────────────────────────────────────────────────────────
    // Fatal errors (missing catalog / library dir) propagate here and exit 1.
    let summary = run(&config).await.context("Run aborted")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Human-readable run summary on stderr.
fn print_summary(summary: &RunSummary) {
    eprintln!("{}", dim(&"─".repeat(50)));
    eprintln!(
        "{} Markdown records: {}",
        green("✔"),
        bold(&summary.records_written.to_string())
    );
    eprintln!(
        "{} PNG previews:     {} {}",
        green("✔"),
        bold(&summary.previews_written.to_string()),
        dim("(PDFs only)")
    );
    if summary.skipped > 0 {
        eprintln!(
            "{} Skipped:          {} {}",
            yellow("⚠"),
            bold(&summary.skipped.to_string()),
            dim("(no catalog entry)")
        );
    }
    if summary.errors.is_empty() {
        eprintln!("{} Errors:           0", green("✔"));
    } else {
        eprintln!(
            "{} Errors:           {}",
            red("✗"),
            bold(&summary.errors.len().to_string())
        );
        for e in &summary.errors {
            eprintln!("   - {e}");
        }
    }
}
