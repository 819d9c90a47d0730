//! Operator-facing report rendering
//!
//! Rendering is pure string building so the exact output can be tested;
//! the monitor decides when to print.

use lyrdb_common::ProgressSnapshot;

const BANNER_WIDTH: usize = 50;

/// Render the progress statistics block
pub fn status_report(snap: &ProgressSnapshot, secs_per_song: f64) -> String {
    let mut out = String::new();

    if snap.is_empty() {
        out.push_str("No songs in database\n");
        return out;
    }

    out.push_str(&format!(
        "Songs with lyrics: {}/{} ({:.1}%)\n",
        snap.completed,
        snap.total,
        snap.percentage()
    ));

    if snap.is_complete() {
        out.push_str("ALL LYRICS FETCHED\n");
    } else {
        out.push_str(&format!("Remaining: {} songs\n", snap.remaining()));
        if let Some(eta) = snap.eta_minutes(secs_per_song) {
            out.push_str(&format!("Estimated time: {:.0} minutes\n", eta));
        }
    }

    if snap.recent > 0 {
        out.push_str(&format!("Fetched in the last hour: {}\n", snap.recent));
    }

    out
}

/// Render the watch-mode completion banner plus the same statistics
///
/// Note: the banner announces that the fetch *process* finished, which is
/// the completion signal in watch mode; the statistics below it say whether
/// the catalog actually filled up.
pub fn completion_banner(snap: &ProgressSnapshot, secs_per_song: f64) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!(
        "{}\nFetch process finished\n{}\n{}",
        rule,
        rule,
        status_report(snap, secs_per_song)
    )
}

/// Header printed when watch mode starts
pub fn watch_header() -> String {
    format!("Monitoring lyrics fetch progress...\n{}", "-".repeat(BANNER_WIDTH))
}
