//! Posts file parsing.
//!
//! UTF-8 text, records separated by lines exactly `---`. Recognized
//! prefixes within a record: `text:`, `media:` (comma-separated URLs),
//! `url:`. Anything else is ignored.

use std::path::Path;

use autopost_common::{AutopostError, PostRecord};

/// Read and parse the posts file. Missing file or zero parsed records is
/// a fatal startup error.
pub fn load_records(path: &Path) -> Result<Vec<PostRecord>, AutopostError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AutopostError::PostsFile(format!("{}: {e}", path.display())))?;

    let records = parse_records(&contents);
    if records.is_empty() {
        return Err(AutopostError::PostsFile(format!(
            "no valid records in {}",
            path.display()
        )));
    }

    tracing::info!(count = records.len(), path = %path.display(), "Loaded post records");
    Ok(records)
}

/// Parse delimited record blocks. A trailing block without a final `---`
/// is still a record; blocks with no recognized field produce nothing.
pub fn parse_records(input: &str) -> Vec<PostRecord> {
    let mut records = Vec::new();
    let mut current = PostRecord::default();

    for line in input.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("text:") {
            current.text = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("media:") {
            current.media_links = rest
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        } else if let Some(rest) = line.strip_prefix("url:") {
            current.url = Some(rest.trim().to_string());
        } else if line == "---" {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            } else {
                current = PostRecord::default();
            }
        }
    }

    if !current.is_empty() {
        records.push(current);
    }

    records
}
