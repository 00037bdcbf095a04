//! Author scraping from HTML citation metadata.
//!
//! Scholarly HTML pages (IACR ePrint, arXiv mirrors, IETF datatracker
//! snapshots) carry Google-Scholar-style `<meta name="citation_author">`
//! tags in `<head>`. Those give real author names where the catalog only
//! holds a publishing organization. PDFs never go through this path; their
//! records fall back to the catalog's `authors_or_organization` field.
//!
//! Only the leading byte window of the file is read: citation metadata
//! lives in the head, and a bounded read keeps a multi-megabyte snapshot
//! from being pulled into memory just to find two meta tags.

use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use std::path::Path;
use tracing::debug;

// Meta tags in the wild put name= and content= in either order, with either
// quote style. Match the whole tag, then pull the attributes out of it.
static RE_META_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());
static RE_NAME_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)name\s*=\s*["']citation_author["']"#).unwrap());
static RE_CONTENT_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)content\s*=\s*["']([^"']+)["']"#).unwrap());

/// Scrape `citation_author` names from the head of an HTML file.
///
/// Returns trimmed names in document order; empty on read error or when no
/// citation metadata is present. Never fails the pipeline.
pub fn scrape_authors(path: &Path, scan_bytes: usize) -> Vec<String> {
    let mut head = Vec::with_capacity(scan_bytes.min(64 * 1024));
    let read = std::fs::File::open(path)
        .and_then(|f| f.take(scan_bytes as u64).read_to_end(&mut head));
    if let Err(e) = read {
        debug!("Author scan skipped for {}: {}", path.display(), e);
        return Vec::new();
    }
    authors_from_html(&String::from_utf8_lossy(&head))
}

/// Extract `citation_author` contents from an HTML fragment, in order.
pub fn authors_from_html(html: &str) -> Vec<String> {
    RE_META_TAG
        .find_iter(html)
        .filter(|tag| RE_NAME_ATTR.is_match(tag.as_str()))
        .filter_map(|tag| {
            RE_CONTENT_ATTR
                .captures(tag.as_str())
                .map(|c| c[1].trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn finds_authors_in_order() {
        let html = r#"<head>
            <meta name="citation_title" content="CRYSTALS-Kyber">
            <meta name="citation_author" content="Joppe Bos">
            <meta name="citation_author" content="Léo Ducas">
        </head>"#;
        assert_eq!(authors_from_html(html), vec!["Joppe Bos", "Léo Ducas"]);
    }

    #[test]
    fn handles_reversed_attribute_order() {
        let html = r#"<meta content="Peter Schwabe" name="citation_author">"#;
        assert_eq!(authors_from_html(html), vec!["Peter Schwabe"]);
    }

    #[test]
    fn handles_single_quotes_and_case() {
        let html = r#"<META NAME='citation_author' CONTENT=' Vadim Lyubashevsky '>"#;
        assert_eq!(authors_from_html(html), vec!["Vadim Lyubashevsky"]);
    }

    #[test]
    fn ignores_other_meta_tags() {
        let html = r#"<meta name="description" content="Not an author">
            <meta name="citation_journal" content="ePrint">"#;
        assert!(authors_from_html(html).is_empty());
    }

    #[test]
    fn empty_on_missing_file() {
        let names = scrape_authors(Path::new("/nonexistent/page.html"), 1024);
        assert!(names.is_empty());
    }

    #[test]
    fn scan_window_bounds_the_read() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        // Author tag placed beyond the scan window must not be found.
        let mut content = String::from("<html><head>");
        content.push_str(&" ".repeat(2048));
        content.push_str(r#"<meta name="citation_author" content="Too Far In">"#);
        f.write_all(content.as_bytes()).unwrap();
        assert!(scrape_authors(f.path(), 1024).is_empty());

        // Inside the window it is found.
        assert_eq!(
            scrape_authors(f.path(), 8192),
            vec!["Too Far In".to_string()]
        );
    }
}
