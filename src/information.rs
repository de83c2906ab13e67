use crate::input::{Dataset, Record};
use itertools::Itertools;
use log::info;

pub fn statistics(dataset: &Dataset) {
    info!(target: "laureates", "before filtering: records: {}", dataset.len());
    if let Some((a, b)) = dataset.year_span() {
        info!(target: "laureates", "years in input data: {a}-{b}");
    }
    info!(
        target: "laureates",
        "gender values: {}",
        dataset.genders().iter().join(", ")
    );
    info!(
        target: "laureates",
        "categories: {}",
        dataset.categories().iter().join(", ")
    );
    info!(
        target: "laureates",
        "distinct countries of birth: {}",
        dataset.countries().len()
    );
}

pub fn post_statistics(view: &[&Record]) {
    info!(target: "laureates", "after filtering: records: {}", view.len());
    info!(
        target: "laureates",
        "after filtering: categories: {}",
        view.iter().map(|r| r.category.as_str()).sorted().dedup().count()
    );
}
