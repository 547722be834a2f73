//! Keyword classification of award rows as water/wastewater utilities.
//!
//! Literal substring matching only, by design: no fuzzy or NLP-based
//! matching. Keywords are normalised once at construction (comma-split,
//! trimmed, lower-cased, blanks dropped) so the per-row predicate is a
//! plain `contains` scan.

use crate::record::AwardRecord;

/// Include keywords that identify water/wastewater utilities by applicant
/// name or project title.
pub const DEFAULT_INCLUDE: [&str; 22] = [
    "water",
    "water district",
    "water dept",
    "water department",
    "water authority",
    "water utility",
    "municipal water",
    "water & sewer",
    "water and sewer",
    "wastewater",
    "waste water",
    "sanitation",
    "sanitary",
    "sewer",
    "wtp",
    "water treatment",
    "waterworks",
    "water works",
    "aqueduct",
    "water supply",
    "water system",
    "irrigation district",
];

/// Normalised include/exclude keyword sets.
#[derive(Debug, Clone, Default)]
pub struct Keywords {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl Keywords {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            include: normalize(include),
            exclude: normalize(exclude),
        }
    }

    /// Parse comma-separated keyword lists as entered by a user.
    pub fn parse(include_csv: &str, exclude_csv: &str) -> Self {
        Self::new(split_csv(include_csv), split_csv(exclude_csv))
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Does this row look like a water/wastewater utility award?
    ///
    /// Exclude keywords are matched against the applicant name ALONE and
    /// reject immediately; include keywords are matched against the
    /// space-joined applicant name and project title. The asymmetry is
    /// deliberate and preserved as-is. An empty include set matches
    /// nothing.
    pub fn is_utility_match(&self, row: &AwardRecord) -> bool {
        let name = row.applicant_name().to_lowercase();
        if self.exclude.iter().any(|kw| name.contains(kw)) {
            return false;
        }
        let title = row.project_title().to_lowercase();
        let text = format!("{name} {title}");
        self.include.iter().any(|kw| text.contains(kw))
    }
}

fn split_csv(csv: &str) -> Vec<String> {
    csv.split(',').map(str::to_string).collect()
}

fn normalize(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty())
        .collect()
}
