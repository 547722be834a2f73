//! `hydrant` — find wildfire-related FEMA Public Assistance funding to
//! water and wastewater utilities.
//!
//! Builds an OData filter from the command-line selections, exhaustively
//! retrieves the matching award rows, classifies them with the keyword
//! lists, and prints detailed, per-utility, and top-utility views.
//! Optionally exports the detailed rows and the summary as CSV.

mod display;
mod export;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use hydrant_client::{API_BASE, OpenFema, fetch_all};
use hydrant_core::{
    AwardRecord, DEFAULT_INCLUDE, FilterCriteria, IncidentMatch, Keywords, SELECT_FIELDS,
    summarize, top_utilities,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "hydrant",
    version,
    about = "Find wildfire-related FEMA Public Assistance funding to water utilities"
)]
struct Args {
    /// Two-letter state codes, comma-separated (e.g. CA,OR).
    #[arg(long, value_delimiter = ',')]
    state: Vec<String>,

    /// Only awards obligated on or after this date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only awards obligated on or before this date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Damage category codes A-G, comma-separated. Upstream documents
    /// this filter as not currently functional; the codes are passed to
    /// the API unchanged.
    #[arg(long, value_delimiter = ',')]
    category: Vec<String>,

    /// Match incidentType by equality against 'Fire' instead of the
    /// broader contains('Fire'/'Wildfire') match.
    #[arg(long)]
    exact_incident: bool,

    /// Include keywords, comma-separated. Defaults to the built-in
    /// water-utility list.
    #[arg(long)]
    include: Option<String>,

    /// Exclude keywords, comma-separated; matched against the applicant
    /// name only.
    #[arg(long, default_value = "")]
    exclude: String,

    /// Rows requested per page.
    #[arg(long, default_value_t = 1000)]
    page_size: u64,

    /// OpenFEMA base URL.
    #[arg(long, env = "HYDRANT_BASE_URL", default_value = API_BASE)]
    base_url: String,

    /// Write matched project rows to this CSV file.
    #[arg(long)]
    detailed_csv: Option<PathBuf>,

    /// Write the per-utility summary to this CSV file.
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Preview row cap for the detailed and summary tables.
    #[arg(long, default_value_t = 100)]
    show: usize,

    /// Number of utilities in the top-by-total-share table.
    #[arg(long, default_value_t = 20)]
    top: usize,
}

impl Args {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            states: self.state.clone(),
            start_date: self.from,
            end_date: self.to,
            categories: self.category.clone(),
            incident_match: if self.exact_incident {
                IncidentMatch::ExactFire
            } else {
                IncidentMatch::FireOrWildfire
            },
        }
    }

    fn keywords(&self) -> Keywords {
        let include = self
            .include
            .clone()
            .unwrap_or_else(|| DEFAULT_INCLUDE.join(","));
        Keywords::parse(&include, &self.exclude)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    run(args).await
}

async fn run(args: Args) -> anyhow::Result<()> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        anyhow::ensure!(from <= to, "--from {from} is after --to {to}");
    }

    let filter = args.criteria().to_filter_expression();
    println!("API filter: {filter}");

    let keywords = args.keywords();
    let source = OpenFema::with_base_url(&args.base_url).context("building HTTP client")?;
    let select: Vec<String> = SELECT_FIELDS.iter().map(|f| f.to_string()).collect();

    let result = fetch_all(&source, &filter, Some(&select), args.page_size, |fraction| {
        info!(pct = format!("{:.0}", fraction * 100.0), "retrieved page");
    })
    .await
    .context("retrieving award records")?;

    println!("Records found (API count): {}", result.total_count);
    println!("Last page URL: {}", result.last_url);

    if result.records.is_empty() {
        println!(
            "No results. Try removing state/date filters, adding more damage \
             categories (B/E often carry wildfire water costs), or the broader \
             incident match."
        );
        return Ok(());
    }

    let matched: Vec<&AwardRecord> = result
        .records
        .iter()
        .filter(|r| keywords.is_utility_match(r))
        .collect();
    println!(
        "Matched {} water-utility project rows out of {} API rows.",
        matched.len(),
        result.records.len()
    );

    display::print_detailed(&matched, args.show);

    let summaries = summarize(&result.records, &keywords);
    display::print_summary(&summaries, args.show);
    display::print_top(&top_utilities(&summaries, args.top));

    if let Some(path) = &args.detailed_csv {
        export::write_detailed(path, &matched, &select)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote detailed CSV to {}", path.display());
    }
    if let Some(path) = &args.summary_csv {
        export::write_summary(path, &summaries)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote summary CSV to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_incident_mode_is_the_broad_contains_match() {
        let args = Args::parse_from(["hydrant"]);
        assert_eq!(
            args.criteria().incident_match,
            IncidentMatch::FireOrWildfire
        );
    }

    #[test]
    fn exact_incident_flag_switches_to_equality() {
        let args = Args::parse_from(["hydrant", "--exact-incident"]);
        assert_eq!(args.criteria().incident_match, IncidentMatch::ExactFire);
    }

    #[test]
    fn comma_separated_states_split_into_codes() {
        let args = Args::parse_from(["hydrant", "--state", "ca,or"]);
        assert_eq!(args.state, ["ca", "or"]);
    }

    #[test]
    fn include_defaults_to_the_built_in_water_utility_list() {
        let args = Args::parse_from(["hydrant"]);
        let keywords = args.keywords();
        assert_eq!(keywords.include().len(), DEFAULT_INCLUDE.len());
        assert!(keywords.exclude().is_empty());
    }

    #[test]
    fn explicit_include_replaces_the_default_list() {
        let args = Args::parse_from(["hydrant", "--include", "aqueduct", "--exclude", "City"]);
        let keywords = args.keywords();
        assert_eq!(keywords.include(), ["aqueduct"]);
        assert_eq!(keywords.exclude(), ["city"]);
    }

    #[test]
    fn dates_parse_as_calendar_dates() {
        let args = Args::parse_from(["hydrant", "--from", "2020-08-01", "--to", "2021-01-31"]);
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2020, 8, 1));
        assert_eq!(args.to, NaiveDate::from_ymd_opt(2021, 1, 31));
    }
}
