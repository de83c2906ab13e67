//! Filter specification and the filter engine.

use crate::errors::{invalid_argument, Result};
use crate::input::{Dataset, Record, Year};
use itertools::Itertools;
use std::collections::HashSet;

/// A filtered view of the dataset: the rows matching the current
/// [FilterSpec], in source row order. Recomputed fresh on every
/// interaction.
pub type FilteredView<'a> = Vec<&'a Record>;

/// User-chosen filter parameters.
///
/// Empty selection sets are legal and match nothing. Year bounds are
/// inclusive on both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSpec {
    pub genders: HashSet<String>,
    pub categories: HashSet<String>,
    pub year_from: Year,
    pub year_to: Year,
}

impl FilterSpec {
    pub fn new(
        genders: HashSet<String>,
        categories: HashSet<String>,
        year_from: Year,
        year_to: Year,
    ) -> Result<FilterSpec> {
        if year_from > year_to {
            return Err(invalid_argument(format!(
                "year range {year_from}-{year_to} is empty"
            )));
        }
        Ok(FilterSpec {
            genders,
            categories,
            year_from,
            year_to,
        })
    }

    /// The everything-selected spec for this dataset: all gender and
    /// category values present, and the full year span of the data.
    pub fn select_all(dataset: &Dataset) -> FilterSpec {
        let (year_from, year_to) = dataset.year_span().unwrap_or((0, 9999));
        FilterSpec {
            genders: dataset.genders().into_iter().collect(),
            categories: dataset.categories().into_iter().collect(),
            year_from,
            year_to,
        }
    }

    pub fn matches(&self, r: &Record) -> bool {
        self.genders.contains(&r.gender)
            && self.categories.contains(&r.category)
            && self.year_from <= r.year
            && r.year <= self.year_to
    }
}

/// The rows of `dataset` satisfying `spec`, in source order.
pub fn filter<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> FilteredView<'a> {
    dataset.records.iter().filter(|r| spec.matches(r)).collect_vec()
}
