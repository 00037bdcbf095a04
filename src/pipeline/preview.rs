//! Preview rendering: page one of a PDF rasterised to `<stem>.png`.
//!
//! Shells out to poppler's `pdftoppm` under a timeout, exactly like text
//! extraction shells out to `pdftotext`. pdftoppm names its output
//! `<prefix>-N.png` where N is zero-padded to the width of the document's
//! total page count (`-1.png`, `-01.png`, `-001.png`), so the rendered file
//! is located by prefix scan rather than by guessing the padding, then
//! renamed to the document's stem.
//!
//! Failure is always soft: the caller records a missing preview and the
//! record simply omits its `preview:` header line.

use crate::config::SummarizeConfig;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Render page one of `pdf_path` to `<output_dir>/<stem>.png`.
///
/// Returns the reason on failure; the pipeline continues either way.
pub async fn render_preview(
    pdf_path: &Path,
    stem: &str,
    output_dir: &Path,
    config: &SummarizeConfig,
) -> Result<PathBuf, String> {
    let tmp_prefix = output_dir.join(format!("_tmp_{stem}"));
    let final_png = output_dir.join(format!("{stem}.png"));

    let output = Command::new("pdftoppm")
        .arg("-r")
        .arg(config.preview_dpi.to_string())
        .arg("-l")
        .arg("1")
        .arg("-png")
        .arg(pdf_path)
        .arg(&tmp_prefix)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match timeout(Duration::from_secs(config.png_timeout_secs), output).await {
        Err(_) => {
            cleanup_tmp(output_dir, stem);
            return Err(format!(
                "pdftoppm timed out after {}s",
                config.png_timeout_secs
            ));
        }
        Ok(Err(e)) => return Err(format!("failed to run pdftoppm: {e}")),
        Ok(Ok(out)) => out,
    };

    if !output.status.success() {
        cleanup_tmp(output_dir, stem);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "pdftoppm exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }

    let rendered = find_rendered_page(output_dir, stem)
        .ok_or_else(|| "pdftoppm produced no output file".to_string())?;

    std::fs::rename(&rendered, &final_png).map_err(|e| {
        cleanup_tmp(output_dir, stem);
        format!("failed to rename {} → {}: {e}", rendered.display(), final_png.display())
    })?;

    debug!("Preview rendered: {}", final_png.display());
    Ok(final_png)
}

/// Locate the page-one PNG produced under the temp prefix.
fn find_rendered_page(output_dir: &Path, stem: &str) -> Option<PathBuf> {
    let prefix = format!("_tmp_{stem}-");
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(output_dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".png"))
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Remove any temp page files a failed or interrupted render left behind.
fn cleanup_tmp(output_dir: &Path, stem: &str) {
    if let Some(leftover) = find_rendered_page(output_dir, stem) {
        let _ = std::fs::remove_file(leftover);
    }
}
