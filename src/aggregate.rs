//! Counting summaries derived from a filtered view.

use crate::input::{Record, Year};
use crate::output::GenderTally;
use is_sorted::IsSorted;
use itertools::Itertools;
use std::collections::HashMap;

/// Count of view rows per prize category. Categories with no matching
/// rows are absent, not present with count 0.
pub type CategoryCounts = HashMap<String, u64>;

/// Count of view rows per year for one country of birth, ascending by
/// year, one entry per distinct year.
pub type CountrySeries = Vec<(Year, u64)>;

pub fn count_by_category(view: &[&Record]) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for r in view {
        *counts.entry(r.category.clone()).or_default() += 1;
    }
    counts
}

/// Narrow `view` to rows born in `country_code`, then count per year.
///
/// A country with no matching rows yields an empty series.
pub fn count_by_year_for_country(view: &[&Record], country_code: &str) -> CountrySeries {
    let mut counts: HashMap<Year, u64> = HashMap::new();
    for r in view {
        if r.born_country_code == country_code {
            *counts.entry(r.year).or_default() += 1;
        }
    }
    let series = counts.into_iter().sorted().collect_vec();
    debug_assert!(IsSorted::is_sorted(&mut series.iter().map(|&(year, _)| year)));
    series
}

pub fn gender_tally(view: &[&Record]) -> GenderTally {
    let mut tally = GenderTally::default();
    for r in view {
        tally.total += 1;
        match r.gender.as_str() {
            "male" => tally.male += 1,
            "female" => tally.female += 1,
            _ => tally.other += 1,
        }
    }
    tally
}
