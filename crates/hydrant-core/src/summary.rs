//! Grouped summary of matched award rows, one output row per applicant.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::classify::Keywords;
use crate::record::AwardRecord;

/// Aggregate figures for one (state, applicant id, applicant name) group.
///
/// Date extremes are `None` only when no row in the group carried a
/// parsable obligation date; such rows still count toward `project_count`
/// and the monetary total.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilitySummary {
    pub state: String,
    pub applicant_id: String,
    pub applicant_name: String,
    pub project_count: u64,
    pub total_federal_share_obligated: f64,
    pub first_date_obligated: Option<NaiveDate>,
    pub last_date_obligated: Option<NaiveDate>,
}

/// Classify `records` with `keywords`, then group the matches by
/// (state, applicant id, applicant name).
///
/// Missing key fields group under "" rather than being dropped. Output is
/// sorted by state ascending, then total federal share descending; ties
/// keep group-discovery order (the sort is stable).
pub fn summarize(records: &[AwardRecord], keywords: &Keywords) -> Vec<UtilitySummary> {
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();
    let mut groups: Vec<UtilitySummary> = Vec::new();

    for row in records.iter().filter(|r| keywords.is_utility_match(r)) {
        let key = (row.state(), row.applicant_id(), row.applicant_name());
        let i = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(UtilitySummary {
                state: key.0.clone(),
                applicant_id: key.1.clone(),
                applicant_name: key.2.clone(),
                project_count: 0,
                total_federal_share_obligated: 0.0,
                first_date_obligated: None,
                last_date_obligated: None,
            });
            groups.len() - 1
        });

        let group = &mut groups[i];
        group.project_count += 1;
        group.total_federal_share_obligated += row.federal_share_obligated();
        if let Some(date) = row.date_obligated() {
            group.first_date_obligated =
                Some(group.first_date_obligated.map_or(date, |cur| cur.min(date)));
            group.last_date_obligated =
                Some(group.last_date_obligated.map_or(date, |cur| cur.max(date)));
        }
    }

    groups.sort_by(|a, b| {
        a.state.cmp(&b.state).then(
            b.total_federal_share_obligated
                .partial_cmp(&a.total_federal_share_obligated)
                .unwrap_or(Ordering::Equal),
        )
    });
    groups
}

/// The `n` summaries with the largest totals, descending; ties keep the
/// incoming order.
pub fn top_utilities(summaries: &[UtilitySummary], n: usize) -> Vec<UtilitySummary> {
    let mut top = summaries.to_vec();
    top.sort_by(|a, b| {
        b.total_federal_share_obligated
            .partial_cmp(&a.total_federal_share_obligated)
            .unwrap_or(Ordering::Equal)
    });
    top.truncate(n);
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn row(value: Value) -> AwardRecord {
        match value {
            Value::Object(map) => AwardRecord::new(map),
            _ => panic!("test rows must be JSON objects"),
        }
    }

    fn water(keywords: &str) -> Keywords {
        Keywords::parse(keywords, "")
    }

    #[test]
    fn unparsable_amounts_count_but_sum_as_zero() {
        let records = vec![
            row(json!({
                "stateAbbreviation": "CA",
                "applicantId": "091-1",
                "applicantName": "Pine Water District",
                "federalShareObligated": 100.0,
            })),
            row(json!({
                "stateAbbreviation": "CA",
                "applicantId": "091-1",
                "applicantName": "Pine Water District",
                "federalShareObligated": "not-a-number",
            })),
        ];
        let groups = summarize(&records, &water("water"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].project_count, 2);
        assert_eq!(groups[0].total_federal_share_obligated, 100.0);
    }

    #[test]
    fn non_matching_rows_never_reach_a_group() {
        let records = vec![
            row(json!({ "applicantName": "Pine Water District" })),
            row(json!({ "applicantName": "County Road Crew" })),
        ];
        let groups = summarize(&records, &water("water"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].applicant_name, "Pine Water District");
    }

    #[test]
    fn date_extremes_span_the_group_and_skip_unparsable_dates() {
        let records = vec![
            row(json!({
                "applicantName": "Pine Water District",
                "dateObligated": "2020-09-03T00:00:00.000Z",
            })),
            row(json!({
                "applicantName": "Pine Water District",
                "dateObligated": "garbled",
            })),
            row(json!({
                "applicantName": "Pine Water District",
                "dateObligated": "2019-11-20T00:00:00.000Z",
            })),
        ];
        let groups = summarize(&records, &water("water"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].project_count, 3);
        assert_eq!(
            groups[0].first_date_obligated,
            NaiveDate::from_ymd_opt(2019, 11, 20)
        );
        assert_eq!(
            groups[0].last_date_obligated,
            NaiveDate::from_ymd_opt(2020, 9, 3)
        );
    }

    #[test]
    fn group_with_no_parsable_dates_has_no_extremes() {
        let records = vec![row(json!({ "applicantName": "Pine Water District" }))];
        let groups = summarize(&records, &water("water"));
        assert_eq!(groups[0].first_date_obligated, None);
        assert_eq!(groups[0].last_date_obligated, None);
    }

    #[test]
    fn sorted_by_state_ascending_then_total_descending() {
        let records = vec![
            row(json!({
                "stateAbbreviation": "OR",
                "applicantName": "Salem Water Bureau",
                "federalShareObligated": 9000.0,
            })),
            row(json!({
                "stateAbbreviation": "CA",
                "applicantName": "Pine Water District",
                "federalShareObligated": 500.0,
            })),
            row(json!({
                "stateAbbreviation": "CA",
                "applicantName": "Ridge Water Authority",
                "federalShareObligated": 1500.0,
            })),
        ];
        let groups = summarize(&records, &water("water"));
        let order: Vec<(&str, f64)> = groups
            .iter()
            .map(|g| (g.state.as_str(), g.total_federal_share_obligated))
            .collect();
        assert_eq!(
            order,
            [("CA", 1500.0), ("CA", 500.0), ("OR", 9000.0)]
        );
    }

    #[test]
    fn equal_totals_keep_discovery_order() {
        let records = vec![
            row(json!({
                "stateAbbreviation": "CA",
                "applicantName": "Alder Water District",
                "federalShareObligated": 700.0,
            })),
            row(json!({
                "stateAbbreviation": "CA",
                "applicantName": "Birch Water District",
                "federalShareObligated": 700.0,
            })),
        ];
        let groups = summarize(&records, &water("water"));
        assert_eq!(groups[0].applicant_name, "Alder Water District");
        assert_eq!(groups[1].applicant_name, "Birch Water District");
    }

    #[test]
    fn missing_key_fields_group_under_empty_strings() {
        let records = vec![
            row(json!({ "projectTitle": "Water main repair" })),
            row(json!({ "projectTitle": "Water tank rebuild" })),
        ];
        let groups = summarize(&records, &water("water"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].state, "");
        assert_eq!(groups[0].project_count, 2);
    }

    #[test]
    fn top_utilities_takes_the_largest_totals_across_states() {
        let summaries = vec![
            UtilitySummary {
                state: "CA".into(),
                applicant_id: "1".into(),
                applicant_name: "A".into(),
                project_count: 1,
                total_federal_share_obligated: 500.0,
                first_date_obligated: None,
                last_date_obligated: None,
            },
            UtilitySummary {
                state: "OR".into(),
                applicant_id: "2".into(),
                applicant_name: "B".into(),
                project_count: 1,
                total_federal_share_obligated: 9000.0,
                first_date_obligated: None,
                last_date_obligated: None,
            },
        ];
        let top = top_utilities(&summaries, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].applicant_name, "B");
    }
}
