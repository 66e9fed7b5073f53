//! Quarterly social-post formatting.
//!
//! Pure function of the run summary and a quarter label; the pipeline writes
//! the result to a text file for a human to review and post.

use chrono::{Datelike, NaiveDate};

use crate::domain::Summary;
use crate::report::fmt_thousands;

/// Quarter label for a run date, e.g. `Q3 2026`.
pub fn quarter_label(date: NaiveDate) -> String {
    let quarter = (date.month() - 1) / 3 + 1;
    format!("Q{quarter} {}", date.year())
}

/// Render the quarterly post. Boroughs are ranked by median descending;
/// boroughs with no samples are left out.
pub fn format_post(summary: &Summary, label: &str) -> String {
    let mut ranked: Vec<_> = summary
        .region_stats
        .iter()
        .filter(|s| s.count > 0)
        .collect();
    ranked.sort_by(|a, b| b.median_rent.cmp(&a.median_rent));

    let mut out = String::new();
    out.push_str(&format!("NYC 1BR rent check, {label}\n\n"));
    out.push_str(&format!(
        "Citywide median: ${} across {} listings\n\n",
        fmt_thousands(summary.overall_median),
        fmt_thousands(summary.used_count as i64)
    ));

    for (i, stat) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}: ${} (n={})\n",
            i + 1,
            stat.region.display_name(),
            fmt_thousands(stat.median_rent),
            fmt_thousands(stat.count as i64)
        ));
    }

    out.push_str("\nUpdated heat map in bio.\n");
    out
}
