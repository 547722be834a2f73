//! CSV export of detailed rows and the per-utility summary.

use std::io::Write;
use std::path::Path;

use hydrant_core::{AwardRecord, UtilitySummary};

use crate::display::date_cell;

const SUMMARY_HEADER: [&str; 7] = [
    "state",
    "applicantId",
    "applicantName",
    "projectCount",
    "totalFederalShareObligated",
    "firstDateObligated",
    "lastDateObligated",
];

/// Write matched rows with exactly the selected fields as columns.
pub fn write_detailed(path: &Path, rows: &[&AwardRecord], fields: &[String]) -> anyhow::Result<()> {
    write_detailed_to(csv::Writer::from_path(path)?, rows, fields)
}

/// Write the per-utility summary rows.
pub fn write_summary(path: &Path, summaries: &[UtilitySummary]) -> anyhow::Result<()> {
    write_summary_to(csv::Writer::from_path(path)?, summaries)
}

fn write_detailed_to<W: Write>(
    mut writer: csv::Writer<W>,
    rows: &[&AwardRecord],
    fields: &[String],
) -> anyhow::Result<()> {
    writer.write_record(fields)?;
    for row in rows {
        let record: Vec<String> = fields.iter().map(|f| row.field_str(f)).collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_summary_to<W: Write>(
    mut writer: csv::Writer<W>,
    summaries: &[UtilitySummary],
) -> anyhow::Result<()> {
    writer.write_record(SUMMARY_HEADER)?;
    for s in summaries {
        writer.write_record([
            s.state.clone(),
            s.applicant_id.clone(),
            s.applicant_name.clone(),
            s.project_count.to_string(),
            format!("{:.2}", s.total_federal_share_obligated),
            date_cell(s.first_date_obligated),
            date_cell(s.last_date_obligated),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
