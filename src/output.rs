//! Data structures for representing the output.

use crate::input::{Record, Year};
use serde::{Deserialize, Serialize};

pub type Years = (Year, Year);

/// Summary metrics over the filtered view.
///
/// Gender values other than "male" and "female" are counted in `other`,
/// so the four fields are defined for any input and
/// `male + female + other == total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenderTally {
    pub total: u64,
    pub male: u64,
    pub female: u64,
    pub other: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct OCategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct OYearCount {
    pub year: Year,
    pub count: u64,
}

/// One full dashboard snapshot: everything the presentation layer needs
/// to render after an interaction.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Output {
    /// Gender values selected in the filter.
    pub genders: Vec<String>,
    /// Categories selected in the filter.
    pub categories: Vec<String>,
    /// Inclusive year range selected in the filter.
    pub year_range: Years,
    /// Inclusive year span of the unfiltered dataset.
    pub dataset_years: Option<Years>,
    pub summary: GenderTally,
    /// Category distribution, descending by count, ties by name.
    pub by_category: Vec<OCategoryCount>,
    /// Selected country of birth, if any.
    pub country: Option<String>,
    /// Prizes per year for the selected country, ascending by year.
    pub series: Vec<OYearCount>,
    /// The filtered rows, in source order.
    pub rows: Vec<Record>,
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}
