//! Configuration for a summarisation run.
//!
//! All run behaviour is controlled through [`SummarizeConfig`], built via its
//! [`SummarizeConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to diff two runs to understand why their outputs differ, and
//! replaces the module-level path constants the tool originally grew around.
//!
//! # Design choice: builder over constructor
//! A dozen-field constructor is unreadable and breaks on every new field.
//! The builder lets callers set only what they care about and rely on
//! documented defaults for the rest.

use crate::error::SummarizeError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for one library-summarisation run.
///
/// Built via [`SummarizeConfig::builder()`].
///
/// # Example
/// ```rust
/// use pqlib2md::SummarizeConfig;
///
/// let config = SummarizeConfig::builder()
///     .catalog_path("src/data/library.csv")
///     .library_dir("public/library")
///     .long_excerpt_words(600)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SummarizeConfig {
    /// Path to the catalog CSV keyed by the `local_file` column.
    pub catalog_path: PathBuf,

    /// Directory containing the `.pdf` and `.html` documents.
    pub library_dir: PathBuf,

    /// Directory records and previews are written to. Default: `library_dir`.
    ///
    /// The original tool wrote outputs next to the sources; keeping that as
    /// the default preserves the `<stem>.md` / `<stem>.png` co-location the
    /// front-end expects, while letting tests and dry runs redirect output.
    pub output_dir: Option<PathBuf>,

    /// Timeout for one `pdftotext` invocation, in seconds. Default: 20.
    ///
    /// Text extraction now reads the whole document rather than the first
    /// few pages, so the bound is higher than a per-page tool would need.
    /// A hung tool holds up the entire sequential run, which is why the
    /// bound exists at all.
    pub pdf_timeout_secs: u64,

    /// Timeout for one `pdftoppm` invocation, in seconds. Default: 15.
    pub png_timeout_secs: u64,

    /// Maximum lines kept from `pdftotext` output. Default: 500.
    ///
    /// Enough to cover the abstract, introduction, and scope sections that
    /// feed the risk classifier; a 200-page standard would otherwise swamp
    /// the excerpt with annex tables.
    pub max_pdf_lines: usize,

    /// Maximum characters kept from extracted HTML text. Default: 20 000.
    pub max_html_chars: usize,

    /// Leading byte window scanned for `citation_author` metas. Default: 64 KiB.
    ///
    /// Citation metadata lives in `<head>`; scanning the whole file would
    /// only add false positives from body text that quotes meta tags.
    pub author_scan_bytes: usize,

    /// Word cap for the long-form description excerpt. Default: 600.
    pub long_excerpt_words: usize,

    /// Word cap for the short trailing excerpt. Default: 80.
    pub short_excerpt_words: usize,

    /// Rendering resolution passed to `pdftoppm -r`. Default: 150.
    ///
    /// 150 DPI keeps page-one previews sharp enough for the library cards
    /// while staying well under 1 MB per PNG.
    pub preview_dpi: u32,

    /// Skip preview rendering entirely. Default: false.
    pub skip_previews: bool,

    /// Optional per-file progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::new(),
            library_dir: PathBuf::new(),
            output_dir: None,
            pdf_timeout_secs: 20,
            png_timeout_secs: 15,
            max_pdf_lines: 500,
            max_html_chars: 20_000,
            author_scan_bytes: 64 * 1024,
            long_excerpt_words: 600,
            short_excerpt_words: 80,
            preview_dpi: 150,
            skip_previews: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for SummarizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizeConfig")
            .field("catalog_path", &self.catalog_path)
            .field("library_dir", &self.library_dir)
            .field("output_dir", &self.output_dir)
            .field("pdf_timeout_secs", &self.pdf_timeout_secs)
            .field("png_timeout_secs", &self.png_timeout_secs)
            .field("max_pdf_lines", &self.max_pdf_lines)
            .field("max_html_chars", &self.max_html_chars)
            .field("author_scan_bytes", &self.author_scan_bytes)
            .field("long_excerpt_words", &self.long_excerpt_words)
            .field("short_excerpt_words", &self.short_excerpt_words)
            .field("preview_dpi", &self.preview_dpi)
            .field("skip_previews", &self.skip_previews)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn RunProgressCallback>"),
            )
            .finish()
    }
}

impl SummarizeConfig {
    /// Create a new builder for `SummarizeConfig`.
    pub fn builder() -> SummarizeConfigBuilder {
        SummarizeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Effective output directory: `output_dir` when set, else `library_dir`.
    pub fn effective_output_dir(&self) -> &PathBuf {
        self.output_dir.as_ref().unwrap_or(&self.library_dir)
    }
}

/// Builder for [`SummarizeConfig`].
#[derive(Debug)]
pub struct SummarizeConfigBuilder {
    config: SummarizeConfig,
}

impl SummarizeConfigBuilder {
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.catalog_path = path.into();
        self
    }

    pub fn library_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.library_dir = path.into();
        self
    }

    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(path.into());
        self
    }

    pub fn pdf_timeout_secs(mut self, secs: u64) -> Self {
        self.config.pdf_timeout_secs = secs.max(1);
        self
    }

    pub fn png_timeout_secs(mut self, secs: u64) -> Self {
        self.config.png_timeout_secs = secs.max(1);
        self
    }

    pub fn max_pdf_lines(mut self, n: usize) -> Self {
        self.config.max_pdf_lines = n.max(1);
        self
    }

    pub fn max_html_chars(mut self, n: usize) -> Self {
        self.config.max_html_chars = n.max(1);
        self
    }

    pub fn author_scan_bytes(mut self, n: usize) -> Self {
        self.config.author_scan_bytes = n.max(512);
        self
    }

    pub fn long_excerpt_words(mut self, n: usize) -> Self {
        self.config.long_excerpt_words = n.max(1);
        self
    }

    pub fn short_excerpt_words(mut self, n: usize) -> Self {
        self.config.short_excerpt_words = n.max(1);
        self
    }

    pub fn preview_dpi(mut self, dpi: u32) -> Self {
        self.config.preview_dpi = dpi.clamp(36, 600);
        self
    }

    pub fn skip_previews(mut self, v: bool) -> Self {
        self.config.skip_previews = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummarizeConfig, SummarizeError> {
        let c = &self.config;
        if c.catalog_path.as_os_str().is_empty() {
            return Err(SummarizeError::InvalidConfig(
                "catalog_path must be set".into(),
            ));
        }
        if c.library_dir.as_os_str().is_empty() {
            return Err(SummarizeError::InvalidConfig(
                "library_dir must be set".into(),
            ));
        }
        if c.short_excerpt_words > c.long_excerpt_words {
            return Err(SummarizeError::InvalidConfig(format!(
                "short excerpt ({} words) must not exceed the long excerpt ({} words)",
                c.short_excerpt_words, c.long_excerpt_words
            )));
        }
        Ok(self.config)
    }
}
