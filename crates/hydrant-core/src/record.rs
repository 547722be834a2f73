//! Award records as returned by the OpenFEMA API.
//!
//! Rows keep their raw JSON shape because the caller chooses the `$select`
//! projection and export must reproduce exactly the fields that came back.
//! Typed accessors coerce the handful of fields the pipeline computes
//! over; malformed numbers become 0.0 and malformed dates become `None`
//! rather than failing the row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default `$select` projection requested from the API.
pub const SELECT_FIELDS: [&str; 12] = [
    "stateAbbreviation",
    "applicantId",
    "applicantName",
    "dateObligated",
    "federalShareObligated",
    "projectTitle",
    "pwNumber",
    "versionNumber",
    "disasterNumber",
    "county",
    "damageCategoryCode",
    "incidentType",
];

/// One Public Assistance grant-award row.
///
/// Materialised in memory only for the duration of one query; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwardRecord(Map<String, Value>);

impl AwardRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// String form of a field; absent and null fields read as "".
    pub fn field_str(&self, name: &str) -> String {
        match self.0.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn state(&self) -> String {
        self.field_str("stateAbbreviation")
    }

    pub fn applicant_id(&self) -> String {
        self.field_str("applicantId")
    }

    pub fn applicant_name(&self) -> String {
        self.field_str("applicantName")
    }

    pub fn project_title(&self) -> String {
        self.field_str("projectTitle")
    }

    pub fn incident_type(&self) -> String {
        self.field_str("incidentType")
    }

    /// Federal share obligated, coerced to a number.
    ///
    /// Accepts JSON numbers and numeric strings; anything else (missing,
    /// null, garbage) coerces to 0.0 so a malformed amount never drops the
    /// row from counts or sums.
    pub fn federal_share_obligated(&self) -> f64 {
        match self.0.get("federalShareObligated") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Obligation date as a calendar date, if it parses.
    pub fn date_obligated(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.field_str("dateObligated"))
    }
}

/// The realised result of one exhaustive retrieval.
#[derive(Debug, Clone)]
pub struct ResultSet {
    /// Rows in server delivery order.
    pub records: Vec<AwardRecord>,
    /// Server-reported total; 0 when the server never reported one.
    pub total_count: u64,
    /// The exact request URL of the final page, kept so a failing or
    /// surprising query can be reproduced in a browser.
    pub last_url: String,
}

/// Parse an ISO-8601 calendar date, tolerating a trailing time component
/// ("2020-08-14T00:00:00.000Z" and plain "2020-08-14" both parse).
fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let head = s.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> AwardRecord {
        match value {
            Value::Object(map) => AwardRecord::new(map),
            _ => panic!("test rows must be JSON objects"),
        }
    }

    #[test]
    fn missing_and_null_fields_read_as_empty_strings() {
        let row = record(json!({ "applicantName": null }));
        assert_eq!(row.applicant_name(), "");
        assert_eq!(row.project_title(), "");
    }

    #[test]
    fn numeric_fields_stringify_for_export() {
        let row = record(json!({ "disasterNumber": 4558 }));
        assert_eq!(row.field_str("disasterNumber"), "4558");
    }

    #[test]
    fn federal_share_accepts_numbers_and_numeric_strings() {
        assert_eq!(
            record(json!({ "federalShareObligated": 1250.5 })).federal_share_obligated(),
            1250.5
        );
        assert_eq!(
            record(json!({ "federalShareObligated": " 300 " })).federal_share_obligated(),
            300.0
        );
    }

    #[test]
    fn federal_share_coerces_garbage_to_zero() {
        assert_eq!(
            record(json!({ "federalShareObligated": "not-a-number" })).federal_share_obligated(),
            0.0
        );
        assert_eq!(
            record(json!({ "federalShareObligated": null })).federal_share_obligated(),
            0.0
        );
        assert_eq!(record(json!({})).federal_share_obligated(), 0.0);
    }

    #[test]
    fn obligation_date_parses_with_or_without_time() {
        let expected = NaiveDate::from_ymd_opt(2020, 8, 14).unwrap();
        assert_eq!(
            record(json!({ "dateObligated": "2020-08-14T00:00:00.000Z" })).date_obligated(),
            Some(expected)
        );
        assert_eq!(
            record(json!({ "dateObligated": "2020-08-14" })).date_obligated(),
            Some(expected)
        );
    }

    #[test]
    fn unparsable_dates_are_none() {
        assert_eq!(record(json!({ "dateObligated": "soon" })).date_obligated(), None);
        assert_eq!(record(json!({})).date_obligated(), None);
    }

    #[test]
    fn records_deserialize_transparently_from_row_objects() {
        let rows: Vec<AwardRecord> = serde_json::from_str(
            r#"[{"stateAbbreviation": "CA", "applicantId": "091-55555"}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].state(), "CA");
        assert_eq!(rows[0].applicant_id(), "091-55555");
    }
}
