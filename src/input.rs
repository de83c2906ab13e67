//! Data structures for representing the loaded dataset.

use crate::errors::{data_malformed, data_unavailable, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::{fs, io};

pub type Year = u16;

const COL_YEAR: &str = "year";
const COL_CATEGORY: &str = "category";
const COL_GENDER: &str = "gender";
const COL_COUNTRY: &str = "bornCountryCode";

/// One prize winner, as one row of the source file.
///
/// The four columns the explorer works with are typed fields;
/// every other column is preserved verbatim in [Record::extra].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Record {
    pub year: Year,
    pub category: String,
    pub gender: String,
    #[serde(rename = "bornCountryCode")]
    pub born_country_code: String,
    pub extra: HashMap<String, String>,
}

impl Record {
    /// The value of the given source column, as it would be rendered.
    pub fn field(&self, column: &str) -> Option<String> {
        match column {
            COL_YEAR => Some(self.year.to_string()),
            COL_CATEGORY => Some(self.category.clone()),
            COL_GENDER => Some(self.gender.clone()),
            COL_COUNTRY => Some(self.born_country_code.clone()),
            _ => self.extra.get(column).cloned(),
        }
    }
}

/// The full loaded dataset: source column order plus all rows in source
/// row order. Immutable after loading.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct gender values, sorted.
    pub fn genders(&self) -> Vec<String> {
        self.distinct(|r| &r.gender)
    }

    /// Distinct prize categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.distinct(|r| &r.category)
    }

    /// Distinct country-of-birth codes, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.distinct(|r| &r.born_country_code)
    }

    fn distinct<F>(&self, get: F) -> Vec<String>
    where
        F: Fn(&Record) -> &String,
    {
        self.records
            .iter()
            .map(|r| get(r).as_str())
            .sorted()
            .dedup()
            .map(str::to_owned)
            .collect_vec()
    }

    /// Inclusive year span of the data, or `None` for an empty dataset.
    pub fn year_span(&self) -> Option<(Year, Year)> {
        let mut years = None;
        for r in &self.records {
            years = match years {
                None => Some((r.year, r.year)),
                Some((a, b)) => Some((a.min(r.year), b.max(r.year))),
            };
        }
        years
    }
}

/// Read and parse the source file.
///
/// Loading is all-or-nothing: the first unreadable or unparsable row
/// fails the whole load.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let file = fs::File::open(path)
        .map_err(|e| data_unavailable(format!("cannot read {}: {e}", path.display())))?;
    parse_dataset(io::BufReader::new(file))
}

fn parse_dataset<R: io::Read>(reader: R) -> Result<Dataset> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv
        .headers()
        .map_err(|e| data_malformed(format!("cannot parse header row: {e}")))?
        .iter()
        .map(str::to_owned)
        .collect_vec();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| data_malformed(format!("missing required column '{name}'")))
    };
    let year_col = column(COL_YEAR)?;
    let category_col = column(COL_CATEGORY)?;
    let gender_col = column(COL_GENDER)?;
    let country_col = column(COL_COUNTRY)?;

    let mut records = Vec::new();
    for (i, row) in csv.records().enumerate() {
        // header is line 1, so data row i is line i + 2
        let line = i + 2;
        let row = row.map_err(|e| data_malformed(format!("line {line}: {e}")))?;
        let field = |col: usize| row.get(col).unwrap_or_default();
        let year = field(year_col);
        let year: Year = year
            .trim()
            .parse()
            .map_err(|_| data_malformed(format!("line {line}: cannot parse year '{year}'")))?;
        let extra = row
            .iter()
            .enumerate()
            .filter(|&(col, _)| {
                col != year_col && col != category_col && col != gender_col && col != country_col
            })
            .map(|(col, value)| (headers[col].clone(), value.to_owned()))
            .collect();
        records.push(Record {
            year,
            category: field(category_col).to_owned(),
            gender: field(gender_col).to_owned(),
            born_country_code: field(country_col).to_owned(),
            extra,
        });
    }
    Ok(Dataset { headers, records })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::{DataMalformed, DataUnavailable};

    const BASIC: &str = "\
firstname,year,category,gender,bornCountryCode
Marie,1903,Physics,female,PL
Albert,1921,Physics,male,DE
";

    fn parse(data: &str) -> Result<Dataset> {
        parse_dataset(data.as_bytes())
    }

    #[test]
    fn parse_basic() {
        let dataset = parse(BASIC).unwrap();
        assert_eq!(
            dataset.headers,
            ["firstname", "year", "category", "gender", "bornCountryCode"]
        );
        assert_eq!(dataset.len(), 2);
        let r = &dataset.records[0];
        assert_eq!(r.year, 1903);
        assert_eq!(r.category, "Physics");
        assert_eq!(r.gender, "female");
        assert_eq!(r.born_country_code, "PL");
        assert_eq!(r.extra["firstname"], "Marie");
        assert_eq!(r.field("firstname"), Some("Marie".to_owned()));
        assert_eq!(r.field("year"), Some("1903".to_owned()));
        assert_eq!(r.field("no-such-column"), None);
    }

    #[test]
    fn parse_missing_column() {
        let e = parse("year,category,gender\n1903,Physics,female\n").unwrap_err();
        assert!(e.downcast_ref::<DataMalformed>().is_some());
        assert!(e.to_string().contains("bornCountryCode"));
    }

    #[test]
    fn parse_bad_year() {
        let e = parse("year,category,gender,bornCountryCode\noops,Physics,female,PL\n")
            .unwrap_err();
        assert!(e.downcast_ref::<DataMalformed>().is_some());
        assert!(e.to_string().contains("line 2"));
    }

    #[test]
    fn missing_file() {
        let e = read_dataset(Path::new("no-such-file.csv")).unwrap_err();
        assert!(e.downcast_ref::<DataUnavailable>().is_some());
    }

    #[test]
    fn distinct_values_sorted() {
        let dataset = parse(
            "year,category,gender,bornCountryCode\n\
             1920,Physics,male,US\n\
             1905,Peace,female,NO\n\
             1905,Peace,male,NO\n",
        )
        .unwrap();
        assert_eq!(dataset.genders(), ["female", "male"]);
        assert_eq!(dataset.categories(), ["Peace", "Physics"]);
        assert_eq!(dataset.countries(), ["NO", "US"]);
        assert_eq!(dataset.year_span(), Some((1905, 1920)));
    }

    #[test]
    fn empty_dataset_span() {
        let dataset = parse("year,category,gender,bornCountryCode\n").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.year_span(), None);
    }
}
