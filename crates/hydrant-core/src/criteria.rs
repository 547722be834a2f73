//! Filter criteria and OData `$filter` expression building for the
//! OpenFEMA Public Assistance grant-award dataset.
//!
//! The remote source accepts a single textual filter expression. Clauses
//! are combined with `and` in a fixed order: incident type, damage
//! category, state, start date, end date. The incident clause is always
//! present; every other clause is optional and omitted entirely when its
//! inputs normalise away to nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The fixed damage-category enumeration. Category F covers utilities
/// (water, power, wastewater, communications).
pub const ALL_CATEGORIES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

/// How the incident-type clause matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IncidentMatch {
    /// `incidentType eq 'Fire'`.
    ExactFire,
    /// Substring match on either "Fire" or "Wildfire". The two incident
    /// labels overlap in the dataset, so this is the broader default.
    #[default]
    FireOrWildfire,
}

/// Structured filter inputs, normally collected by the presentation layer.
///
/// Entries in `states` and `categories` are trimmed and upper-cased before
/// use; blank entries are dropped, and category codes outside
/// [`ALL_CATEGORIES`] are dropped silently rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub states: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub categories: Vec<String>,
    pub incident_match: IncidentMatch,
}

impl FilterCriteria {
    /// Build the OData `$filter` expression for these criteria.
    ///
    /// Pure and infallible: invalid entries are normalised away, never
    /// reported. Never emits an empty parenthesis group.
    pub fn to_filter_expression(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        match self.incident_match {
            IncidentMatch::FireOrWildfire => parts.push(
                "(substringof('Fire',incidentType) or substringof('Wildfire',incidentType))"
                    .to_string(),
            ),
            IncidentMatch::ExactFire => parts.push("incidentType eq 'Fire'".to_string()),
        }

        let categories = normalize_codes(&self.categories, Some(&ALL_CATEGORIES));
        if let Some(clause) = or_clause("damageCategoryCode", &categories) {
            parts.push(clause);
        }

        let states = normalize_codes(&self.states, None);
        if let Some(clause) = or_clause("stateAbbreviation", &states) {
            parts.push(clause);
        }

        if let Some(start) = self.start_date {
            parts.push(format!("dateObligated ge '{start}'"));
        }
        if let Some(end) = self.end_date {
            parts.push(format!("dateObligated le '{end}'"));
        }

        parts.join(" and ")
    }
}

/// Trim and upper-case codes, dropping blanks and (when `allowed` is
/// given) anything outside the accepted set.
fn normalize_codes(codes: &[String], allowed: Option<&[&str]>) -> Vec<String> {
    codes
        .iter()
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .filter(|c| allowed.is_none_or(|set| set.contains(&c.as_str())))
        .collect()
}

/// `(field eq 'A' or field eq 'B' ...)`, or `None` when no codes survived.
fn or_clause(field: &str, codes: &[String]) -> Option<String> {
    if codes.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = codes.iter().map(|c| format!("{field} eq '{c}'")).collect();
    Some(format!("({})", alternatives.join(" or ")))
}
