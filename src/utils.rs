//! File naming and file system helpers.
//!
//! - Name sanitizing for article folders and files
//! - Turning a page URL path into a document collection file name
//! - Output directory validation

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Maximum length of a sanitized name.
pub const MAX_NAME_LEN: usize = 20;

static NOT_LOWER_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("valid regex"));
static NOT_PATH_SAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid regex"));

/// Lowercase, keep only `a-z0-9`, and cut to [`MAX_NAME_LEN`] characters.
///
/// Accented letters are dropped, not transliterated. Two names sharing the
/// same first twenty kept characters map to the same file.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_name("Assembly — 2024 Results!!"), "assembly2024results");
/// assert_eq!(sanitize_name("Árbitros"), "rbitros");
/// ```
pub fn sanitize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut kept = NOT_LOWER_ALNUM.replace_all(&lowered, "").into_owned();
    kept.truncate(MAX_NAME_LEN);
    kept
}

/// File name for the documents found on `page_url`: the decoded URL path
/// with `/` turned into `_`, unsafe characters removed and `.json` appended.
pub fn page_path_file_name(page_url: &Url) -> String {
    let decoded = urlencoding::decode_binary(page_url.path().as_bytes());
    let underscored = String::from_utf8_lossy(&decoded).replace('/', "_");
    let cleaned = NOT_PATH_SAFE.replace_all(&underscored, "");
    let stem = cleaned.trim_matches('_');
    let stem = if stem.is_empty() { "index" } else { stem };
    format!("{stem}.json")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let scratch_path = format!("{}/..__write_check__", path.trim_end_matches('/'));
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
