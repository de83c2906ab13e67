use itertools::Itertools;
use laureates::driver::{self, DriverArgs};
use laureates::errors::DataUnavailable;
use laureates::filter::FilterSpec;
use laureates::loader;
use laureates::output::{OCategoryCount, OYearCount, Output};
use std::path::PathBuf;
use std::sync::Arc;

fn init() {
    let _ = pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn sample_path() -> PathBuf {
    let dir = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(dir);
    path.push("sample-data/nobel-sample.csv");
    path
}

#[test]
fn load_is_cached() {
    init();
    let first = loader::load(&sample_path()).unwrap();
    let second = loader::load(&sample_path()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 14);
    assert_eq!(
        first.headers,
        ["year", "category", "firstname", "surname", "gender", "bornCountryCode"]
    );
    // source row order survives the load
    let years = first.records.iter().map(|r| r.year).collect_vec();
    assert!(years.iter().tuple_windows().all(|(a, b)| a <= b));
    assert_eq!(first.year_span(), Some((1901, 2014)));
}

#[test]
fn load_missing_file() {
    init();
    let e = loader::load(&PathBuf::from("sample-data/no-such-file.csv")).unwrap_err();
    assert!(e.downcast_ref::<DataUnavailable>().is_some());
}

#[test]
fn full_snapshot() {
    init();
    let dataset = loader::load(&sample_path()).unwrap();
    let mut spec = FilterSpec::select_all(&dataset);
    spec.genders = ["female"].iter().map(|&s| s.to_owned()).collect();
    spec.year_from = 1901;
    spec.year_to = 1940;
    let args = DriverArgs {
        spec,
        country: Some("US".to_owned()),
    };
    let output = driver::calc(&args, &dataset).unwrap();

    assert_eq!(output.summary.total, 5);
    assert_eq!(output.summary.female, 5);
    assert_eq!(output.summary.male, 0);
    assert_eq!(output.summary.other, 0);

    assert_eq!(
        output.by_category,
        [
            OCategoryCount {
                category: "Peace".to_owned(),
                count: 2,
            },
            OCategoryCount {
                category: "Chemistry".to_owned(),
                count: 1,
            },
            OCategoryCount {
                category: "Literature".to_owned(),
                count: 1,
            },
            OCategoryCount {
                category: "Physics".to_owned(),
                count: 1,
            },
        ]
    );

    assert_eq!(
        output.series,
        [
            OYearCount {
                year: 1931,
                count: 1,
            },
            OYearCount {
                year: 1938,
                count: 1,
            },
        ]
    );

    let surnames = output
        .rows
        .iter()
        .map(|r| r.extra["surname"].as_str())
        .collect_vec();
    assert_eq!(
        surnames,
        ["Curie", "von Suttner", "Curie", "Addams", "Buck"]
    );
    assert_eq!(output.dataset_years, Some((1901, 2014)));
    assert_eq!(output.year_range, (1901, 1940));
}

#[test]
fn counts_conserve_rows() {
    init();
    let dataset = loader::load(&sample_path()).unwrap();
    let args = DriverArgs {
        spec: FilterSpec::select_all(&dataset),
        country: None,
    };
    let output = driver::calc(&args, &dataset).unwrap();
    let counted: u64 = output.by_category.iter().map(|c| c.count).sum();
    assert_eq!(counted, output.rows.len() as u64);
    assert_eq!(output.rows.len(), dataset.len());
    assert!(output.series.is_empty());
}

#[test]
fn single_year_range() {
    init();
    let dataset = loader::load(&sample_path()).unwrap();
    let mut spec = FilterSpec::select_all(&dataset);
    spec.year_from = 1965;
    spec.year_to = 1965;
    let args = DriverArgs { spec, country: None };
    let output = driver::calc(&args, &dataset).unwrap();
    assert_eq!(output.summary.total, 2);
    assert_eq!(
        output.by_category,
        [OCategoryCount {
            category: "Physics".to_owned(),
            count: 2,
        }]
    );
}

#[test]
fn snapshot_roundtrip() {
    init();
    let dataset = loader::load(&sample_path()).unwrap();
    let args = DriverArgs {
        spec: FilterSpec::select_all(&dataset),
        country: Some("PL".to_owned()),
    };
    let output = driver::calc(&args, &dataset).unwrap();
    let encoded = serde_json::to_string(&output).unwrap();
    let decoded: Output = serde_json::from_str(&encoded).unwrap();
    assert_eq!(output, decoded);
}
