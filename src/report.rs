use crate::constants::{AVERAGE, NO_RATING, REPORT_WIDTH};
use crate::error::Result;
use crate::types::{AverageRating, MovieReport};
use std::fmt::Write;

/// `"{site} rating:"` followed by the value right-aligned to a shared width.
///
/// Overlong values get no padding at all.
pub fn format_rating(site: &str, rating: &str) -> String {
    let used = site.chars().count() + rating.chars().count();
    let spaces = " ".repeat(REPORT_WIDTH.saturating_sub(used));
    format!("{site} rating:{spaces}{rating}")
}

pub fn format_average(average: AverageRating) -> String {
    match average {
        AverageRating::Score(score) => format!("{score:.1}"),
        AverageRating::NoRating => NO_RATING.to_string(),
    }
}

/// Plain-text report as printed to stdout
pub fn render_report(report: &MovieReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n\n{} ({})\n", report.movie.title, report.movie.year);
    for rating in &report.ratings {
        let _ = writeln!(out, "{}", format_rating(&rating.source, rating.entry.display()));
    }
    let _ = writeln!(
        out,
        "\n{}",
        format_rating(AVERAGE, &format_average(report.average))
    );
    out
}

pub fn render_json(report: &MovieReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
