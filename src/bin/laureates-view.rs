use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cliclack::log;
use itertools::Itertools;
use laureates::driver::{self, DriverArgs};
use laureates::export;
use laureates::filter::FilterSpec;
use laureates::input::{Dataset, Record, Year};
use laureates::loader;
use laureates::output::Output;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{fs, io};

const CHART_WIDTH: usize = 30;
const RAW_ROWS: usize = 15;

/// Explore
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input file (CSV)
    infile: PathBuf,
    /// Default snapshot file (JSON)
    #[arg(long, default_value = "snapshot.json")]
    outfile: String,
}

#[derive(Clone, PartialEq, Eq)]
enum Action {
    Genders,
    Categories,
    Years,
    Country,
    ByCategory,
    ByYear,
    RawData,
    Save,
    Export,
    Quit,
}

fn value_counts<'a, F>(dataset: &'a Dataset, get: F) -> HashMap<&'a str, usize>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in &dataset.records {
        *counts.entry(get(r)).or_default() += 1;
    }
    counts
}

fn select_genders(dataset: &Dataset, current: &HashSet<String>) -> Result<HashSet<String>> {
    let nrecords = dataset.len();
    let counts = value_counts(dataset, |r| r.gender.as_str());
    let mut items = vec![];
    for (&val, &count) in counts.iter().sorted() {
        items.push((val.to_owned(), format!("{val} ({count}/{nrecords} winners)"), ""));
    }
    let choices = cliclack::multiselect("Select genders (none is a valid selection):")
        .items(&items)
        .initial_values(current.iter().cloned().collect_vec())
        .required(false)
        .interact()?;
    Ok(choices.into_iter().collect())
}

fn select_categories(dataset: &Dataset, current: &HashSet<String>) -> Result<HashSet<String>> {
    let nrecords = dataset.len();
    let counts = value_counts(dataset, |r| r.category.as_str());
    let mut items = vec![];
    for (&val, &count) in counts.iter().sorted() {
        items.push((val.to_owned(), format!("{val} ({count}/{nrecords} winners)"), ""));
    }
    let choices = cliclack::multiselect("Select categories (none is a valid selection):")
        .items(&items)
        .initial_values(current.iter().cloned().collect_vec())
        .required(false)
        .interact()?;
    Ok(choices.into_iter().collect())
}

fn select_years(spec: &FilterSpec) -> Result<Option<(Year, Year)>> {
    let from: String = cliclack::input("First year to include?")
        .default_input(&spec.year_from.to_string())
        .interact()?;
    let Ok(from) = from.trim().parse::<Year>() else {
        log::warning(format!("'{from}' is not a year"))?;
        return Ok(None);
    };
    let to: String = cliclack::input("Last year to include?")
        .default_input(&spec.year_to.to_string())
        .interact()?;
    let Ok(to) = to.trim().parse::<Year>() else {
        log::warning(format!("'{to}' is not a year"))?;
        return Ok(None);
    };
    if from > to {
        log::warning(format!("year range {from}-{to} is empty"))?;
        return Ok(None);
    }
    Ok(Some((from, to)))
}

fn select_country(dataset: &Dataset) -> Result<String> {
    let nrecords = dataset.len();
    let counts = value_counts(dataset, |r| r.born_country_code.as_str());
    let mut items = vec![];
    for (&val, &count) in counts.iter().sorted() {
        items.push((val.to_owned(), format!("{val} ({count}/{nrecords} winners)"), ""));
    }
    let choice = cliclack::select("Select a country of birth:")
        .items(&items)
        .interact()?;
    Ok(choice)
}

fn summarize(spec: &FilterSpec, country: Option<&str>, output: &Output) -> String {
    let quoted = |values: &HashSet<String>| {
        if values.is_empty() {
            "none".to_owned()
        } else {
            values.iter().sorted().map(|x| format!("'{x}'")).join(", ")
        }
    };
    let s = &output.summary;
    let options = textwrap::Options::new(70).subsequent_indent("  ");
    [
        format!("genders: {}", quoted(&spec.genders)),
        format!("categories: {}", quoted(&spec.categories)),
        format!("years: {}-{}", spec.year_from, spec.year_to),
        format!("country for the per-year chart: {}", country.unwrap_or("none")),
        format!(
            "winners: {} total, {} male, {} female, {} other",
            s.total, s.male, s.female, s.other
        ),
    ]
    .iter()
    .map(|line| textwrap::fill(line, &options))
    .join("\n")
}

fn category_chart(output: &Output) -> String {
    let Some(max) = output.by_category.iter().map(|c| c.count).max() else {
        return "no matching winners".to_owned();
    };
    let pad = output
        .by_category
        .iter()
        .map(|c| c.category.len())
        .max()
        .unwrap_or(0);
    output
        .by_category
        .iter()
        .map(|c| {
            let width = ((c.count as usize * CHART_WIDTH) / max as usize).max(1);
            format!("{:<pad$} {:>5} {}", c.category, c.count, "█".repeat(width))
        })
        .join("\n")
}

fn year_chart(output: &Output) -> String {
    if output.series.is_empty() {
        return "no matching winners".to_owned();
    }
    let max = output.series.iter().map(|p| p.count).max().unwrap_or(1);
    output
        .series
        .iter()
        .map(|p| {
            let width = ((p.count as usize * CHART_WIDTH) / max as usize).max(1);
            format!("{} {:>5} {}", p.year, p.count, "█".repeat(width))
        })
        .join("\n")
}

fn raw_rows(dataset: &Dataset, output: &Output) -> String {
    if output.rows.is_empty() {
        return "no matching winners".to_owned();
    }
    let options = textwrap::Options::new(70).subsequent_indent("  ");
    let mut lines = vec![textwrap::fill(&dataset.headers.iter().join(", "), &options)];
    for r in output.rows.iter().take(RAW_ROWS) {
        let line = dataset
            .headers
            .iter()
            .map(|h| r.field(h).unwrap_or_default())
            .join(", ");
        lines.push(textwrap::fill(&line, &options));
    }
    if output.rows.len() > RAW_ROWS {
        lines.push(format!("... and {} more rows", output.rows.len() - RAW_ROWS));
    }
    lines.join("\n")
}

fn recompute(spec: &FilterSpec, country: Option<&String>, dataset: &Dataset) -> Result<Output> {
    let driver_args = DriverArgs {
        spec: spec.clone(),
        country: country.cloned(),
    };
    driver::calc(&driver_args, dataset).map_err(|e| anyhow!("{e}"))
}

fn save_snapshot(outfile: &str, output: &Output) -> Result<()> {
    let filename: String = cliclack::input("file name")
        .default_input(outfile)
        .interact()?;
    let file = fs::File::create(&filename)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, output)?;
    log::info(format!("Wrote to {filename}"))?;
    Ok(())
}

fn export_xlsx(dataset: &Dataset, output: &Output) -> Result<()> {
    let filename: String = cliclack::input("file name")
        .default_input("selection.xlsx")
        .interact()?;
    let view = output.rows.iter().collect_vec();
    export::write_xlsx(Path::new(&filename), dataset, &view).map_err(|e| anyhow!("{e}"))?;
    log::info(format!("Wrote to {filename}"))?;
    Ok(())
}

fn explore(dataset: &Arc<Dataset>, outfile: &str) -> Result<()> {
    let mut spec = FilterSpec::select_all(dataset);
    let mut country = dataset.countries().first().cloned();
    loop {
        let output = recompute(&spec, country.as_ref(), dataset)?;
        cliclack::note("Selection", summarize(&spec, country.as_deref(), &output))?;

        let items = vec![
            (Action::Genders, "Select genders", ""),
            (Action::Categories, "Select categories", ""),
            (Action::Years, "Set the year range", ""),
            (Action::Country, "Select the country for the per-year chart", ""),
            (Action::ByCategory, "Show winners by category", ""),
            (Action::ByYear, "Show winners per year for the country", ""),
            (Action::RawData, "Show the matching rows", ""),
            (Action::Save, "Write the current snapshot to a JSON file", ""),
            (Action::Export, "Export the matching rows to a spreadsheet", ""),
            (Action::Quit, "Quit", ""),
        ];
        let choice = cliclack::select("Action?").items(&items).interact()?;
        match choice {
            Action::Quit => break,
            Action::Genders => {
                spec.genders = select_genders(dataset, &spec.genders)?;
            }
            Action::Categories => {
                spec.categories = select_categories(dataset, &spec.categories)?;
            }
            Action::Years => {
                if let Some((from, to)) = select_years(&spec)? {
                    spec.year_from = from;
                    spec.year_to = to;
                }
            }
            Action::Country => {
                country = Some(select_country(dataset)?);
            }
            Action::ByCategory => {
                cliclack::note("Winners by category", category_chart(&output))?;
            }
            Action::ByYear => {
                let title = match &country {
                    None => "Winners per year".to_owned(),
                    Some(c) => format!("Winners per year, born in {c}"),
                };
                cliclack::note(title, year_chart(&output))?;
            }
            Action::RawData => {
                cliclack::note("Matching rows", raw_rows(dataset, &output))?;
            }
            Action::Save => save_snapshot(outfile, &output)?,
            Action::Export => export_xlsx(dataset, &output)?,
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    cliclack::intro("laureates-view")?;
    log::info(format!("Reading {}...", args.infile.display()))?;
    let dataset = loader::load(&args.infile)
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("cannot load {}", args.infile.display()))?;
    if dataset.is_empty() {
        log::warning("the dataset has no rows")?;
    }
    explore(&dataset, &args.outfile)?;
    cliclack::outro("Bye!")?;
    Ok(())
}
