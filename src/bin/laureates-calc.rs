use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use console::style;
use itertools::Itertools;
use laureates::driver::{self, DriverArgs};
use laureates::errors::Result;
use laureates::export;
use laureates::filter::FilterSpec;
use laureates::input::{Dataset, Year};
use laureates::loader;
use laureates::output::{OError, Output};
use log::{error, info};
use std::collections::HashSet;
use std::path::PathBuf;
use std::{error as stderror, fs, io, process};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input file (CSV)
    infile: PathBuf,
    /// Output file (JSON)
    outfile: String,
    /// Gender to include; repeat for several (default: all values present)
    #[arg(long = "gender")]
    genders: Vec<String>,
    /// Category to include; repeat for several (default: all values present)
    #[arg(long = "category")]
    categories: Vec<String>,
    /// First year to include (default: first year in the data)
    #[arg(long)]
    from: Option<Year>,
    /// Last year to include (default: last year in the data)
    #[arg(long)]
    to: Option<Year>,
    /// Country of birth for the per-year series
    #[arg(long)]
    country: Option<String>,
    /// Also export the filtered rows as a spreadsheet
    #[arg(long)]
    xlsx: Option<PathBuf>,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn build_spec(args: &Args, dataset: &Dataset) -> Result<FilterSpec> {
    let defaults = FilterSpec::select_all(dataset);
    let genders: HashSet<String> = if args.genders.is_empty() {
        defaults.genders
    } else {
        args.genders.iter().cloned().collect()
    };
    let categories: HashSet<String> = if args.categories.is_empty() {
        defaults.categories
    } else {
        args.categories.iter().cloned().collect()
    };
    FilterSpec::new(
        genders,
        categories,
        args.from.unwrap_or(defaults.year_from),
        args.to.unwrap_or(defaults.year_to),
    )
}

fn finished(output: &Output) {
    let s = &output.summary;
    eprintln!(
        "{} {} winners: {} male, {} female, {} other",
        style(format!("{:>12}", "Finished")).blue().bold(),
        s.total,
        s.male,
        s.female,
        s.other,
    );
}

fn process(args: &Args) -> Result<()> {
    let dataset = loader::load(&args.infile)?;
    let spec = build_spec(args, &dataset)?;
    let driver_args = DriverArgs {
        spec,
        country: args.country.clone(),
    };
    let output = driver::calc(&driver_args, &dataset)?;
    if let Some(xlsx) = &args.xlsx {
        let view = output.rows.iter().collect_vec();
        export::write_xlsx(xlsx, &dataset, &view)?;
    }
    info!(target: "laureates", "write: {}", args.outfile);
    let file = fs::File::create(&args.outfile)?;
    let writer = io::BufWriter::new(file);
    if args.compact {
        serde_json::to_writer(writer, &output)?;
    } else {
        serde_json::to_writer_pretty(writer, &output)?;
    }
    finished(&output);
    Ok(())
}

fn store_error(error_file: &str, e: &dyn stderror::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match args.error_file {
                Some(filename) => match store_error(&filename, &*e) {
                    Ok(()) => {
                        info!(target: "laureates", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "laureates", "{e}");
                        error!(target: "laureates", "{e2}");
                    }
                },
                None => error!(target: "laureates", "{e}"),
            }
            process::exit(1);
        }
    }
}
