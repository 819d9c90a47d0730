//! Fetch log tail
//!
//! The fetch process appends a free-form log; the monitor surfaces the last
//! few lines that look like outcome summaries. The text is opaque and is
//! forwarded verbatim to the operator, never parsed or structured.

use std::io;
use std::path::Path;

/// Keywords marking outcome-summary lines in the fetch log
pub const DEFAULT_KEYWORDS: &[&str] = &["complete", "successful", "failed"];

/// Last `max_lines` log lines containing any keyword (case-insensitive)
///
/// A missing log file is reported as an `io::Error`; callers decide whether
/// that is worth mentioning (the monitor skips it with a debug log).
pub fn tail_filtered(path: &Path, max_lines: usize, keywords: &[&str]) -> io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;

    let matched: Vec<&str> = content
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
        .collect();

    let skip = matched.len().saturating_sub(max_lines);
    Ok(matched[skip..].iter().map(|s| s.to_string()).collect())
}
