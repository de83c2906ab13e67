//! Main entry point for recomputing the dashboard views.

use crate::aggregate;
use crate::errors::{invalid_argument, Result};
use crate::filter::{self, FilterSpec};
use crate::information;
use crate::input::Dataset;
use crate::output::{OCategoryCount, OYearCount, Output};
use itertools::Itertools;
use log::debug;

/// What to recompute?
pub struct DriverArgs {
    /// The current filter selection.
    pub spec: FilterSpec,

    /// Country of birth for the per-year series.
    /// Must be a value present in the unfiltered dataset (the selector is
    /// populated from [Dataset::countries]); it may still have no matches
    /// in the current filtered view, which yields an empty series.
    pub country: Option<String>,
}

/// Recompute every view for one interaction.
///
/// This is the main entry point for the library. Each call is a full,
/// stateless recomputation from the immutable dataset: the filtered rows,
/// the summary tally, the category distribution, and (when a country is
/// selected) the per-year series.
pub fn calc(args: &DriverArgs, dataset: &Dataset) -> Result<Output> {
    if let Some(country) = &args.country {
        if !dataset
            .records
            .iter()
            .any(|r| &r.born_country_code == country)
        {
            return Err(invalid_argument(format!(
                "unknown country code '{country}'"
            )));
        }
    }
    information::statistics(dataset);
    let view = filter::filter(dataset, &args.spec);
    information::post_statistics(&view);

    let summary = aggregate::gender_tally(&view);
    let by_category = aggregate::count_by_category(&view)
        .into_iter()
        .sorted_by(|(cat_a, n_a), (cat_b, n_b)| n_b.cmp(n_a).then_with(|| cat_a.cmp(cat_b)))
        .map(|(category, count)| OCategoryCount { category, count })
        .collect_vec();
    let series = match &args.country {
        None => vec![],
        Some(country) => aggregate::count_by_year_for_country(&view, country)
            .into_iter()
            .map(|(year, count)| OYearCount { year, count })
            .collect_vec(),
    };
    debug!(
        target: "laureates",
        "{} categories, {} series points",
        by_category.len(),
        series.len()
    );

    Ok(Output {
        genders: args.spec.genders.iter().cloned().sorted().collect_vec(),
        categories: args.spec.categories.iter().cloned().sorted().collect_vec(),
        year_range: (args.spec.year_from, args.spec.year_to),
        dataset_years: dataset.year_span(),
        summary,
        by_category,
        country: args.country.clone(),
        series,
        rows: view.into_iter().cloned().collect_vec(),
    })
}
