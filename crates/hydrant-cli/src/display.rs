//! Aligned-column table rendering for the three result views.

use chrono::NaiveDate;
use hydrant_core::{AwardRecord, UtilitySummary};

/// Print matched project rows, capped at `limit`.
pub fn print_detailed(rows: &[&AwardRecord], limit: usize) {
    println!();
    println!("=== Detailed results (water-utility project rows) ===");
    println!(
        "{:<6} {:<40} {:<44} {:<12} {:>14}",
        "State", "Applicant", "Project title", "Obligated", "Federal share"
    );
    for row in rows.iter().take(limit) {
        println!(
            "{:<6} {:<40} {:<44} {:<12} {:>14.2}",
            row.state(),
            truncate(&row.applicant_name(), 40),
            truncate(&row.project_title(), 44),
            date_cell(row.date_obligated()),
            row.federal_share_obligated(),
        );
    }
    if rows.len() > limit {
        println!("... and {} more", rows.len() - limit);
    }
}

/// Print the per-utility summary, capped at `limit`.
pub fn print_summary(summaries: &[UtilitySummary], limit: usize) {
    println!();
    println!("=== Summary by utility ===");
    println!(
        "{:<6} {:<14} {:<40} {:>9} {:>16} {:<12} {:<12}",
        "State", "Applicant ID", "Applicant", "Projects", "Total federal", "First", "Last"
    );
    for s in summaries.iter().take(limit) {
        println!(
            "{:<6} {:<14} {:<40} {:>9} {:>16.2} {:<12} {:<12}",
            s.state,
            s.applicant_id,
            truncate(&s.applicant_name, 40),
            s.project_count,
            s.total_federal_share_obligated,
            date_cell(s.first_date_obligated),
            date_cell(s.last_date_obligated),
        );
    }
    if summaries.len() > limit {
        println!("... and {} more", summaries.len() - limit);
    }
}

/// Print the top utilities by total federal share.
pub fn print_top(top: &[UtilitySummary]) {
    if top.is_empty() {
        return;
    }
    println!();
    println!("=== Top utilities by total federal share ===");
    for (rank, s) in top.iter().enumerate() {
        println!(
            "{:>3}. {:<6} {:<40} {:>9} projects {:>16.2}",
            rank + 1,
            s.state,
            truncate(&s.applicant_name, 40),
            s.project_count,
            s.total_federal_share_obligated,
        );
    }
}

/// Calendar date or an empty cell.
pub fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Shorten to at most `max` characters, ellipsised.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate("Pine Water District", 40), "Pine Water District");
    }

    #[test]
    fn long_strings_are_ellipsised_within_the_budget() {
        let out = truncate("Metropolitan Water Reclamation District of Greater Chicago", 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn date_cells_render_calendar_dates_without_time() {
        assert_eq!(
            date_cell(NaiveDate::from_ymd_opt(2020, 8, 14)),
            "2020-08-14"
        );
        assert_eq!(date_cell(None), "");
    }
}
