use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Benchmark timings of one backend, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    vals: Vec<f64>,
}

impl Series {
    pub fn new(name: &str, vals: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            vals,
        }
    }

    /// Load a [`Series`] from a headerless single-column CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, or if any line
    /// does not hold exactly one finite number.
    pub fn from_csv<P: AsRef<Path>>(name: &str, file: P) -> Result<Self> {
        let file = file.as_ref();
        let reader =
            BufReader::new(File::open(file).with_context(|| format!("failed to open {file:?}"))?);

        Self::from_reader(name, reader).with_context(|| format!("failed to parse {file:?}"))
    }

    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut vals = Vec::new();
        for record in reader.records() {
            let record = record.context("failed to read record")?;
            let line = record.position().map_or(0, |pos| pos.line());

            // Whitespace-only lines.
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            if record.len() != 1 {
                bail!(
                    "line {line} must have exactly 1 field, but has {}",
                    record.len()
                );
            }

            let field = &record[0];
            let val: f64 = field
                .parse()
                .with_context(|| format!("line {line}: {field:?} is not a number"))?;
            if !val.is_finite() {
                bail!("line {line}: {field:?} is not a finite number");
            }
            vals.push(val);
        }

        Ok(Self::new(name, vals))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vals(&self) -> &[f64] {
        &self.vals
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }
}

/// Several series aligned on a shared 0-based run index.
///
/// Shorter series are padded with missing values up to [`Table::n_runs`].
#[derive(Debug)]
pub struct Table {
    series_vec: Vec<Series>,
    n_runs: usize,
}

impl Table {
    pub fn align(series_vec: Vec<Series>) -> Self {
        let n_runs = series_vec.iter().map(Series::len).max().unwrap_or(0);
        for series in &series_vec {
            if series.len() != n_runs {
                log::warn!(
                    "{} series has {} runs, padding to {n_runs}",
                    series.name(),
                    series.len()
                );
            }
        }
        Self { series_vec, n_runs }
    }

    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    pub fn series(&self) -> &[Series] {
        &self.series_vec
    }

    pub fn column(&self, name: &str) -> Option<&Series> {
        self.series_vec.iter().find(|series| series.name() == name)
    }

    /// Value of series `name` at run `run`, `None` if missing.
    pub fn get(&self, name: &str, run: usize) -> Option<f64> {
        self.column(name)?.vals().get(run).copied()
    }

    /// Smallest and largest value over all series, `None` if every series is empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series_vec
            .iter()
            .flat_map(|series| series.vals().iter().copied())
            .fold(None, |range, val| match range {
                None => Some((val, val)),
                Some((min, max)) => Some((min.min(val), max.max(val))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Series> {
        Series::from_reader("kqueue", input.as_bytes())
    }

    #[test]
    fn reads_one_value_per_line() {
        let series = parse("10\n20.5\n 30 \n").unwrap();
        assert_eq!(series.name(), "kqueue");
        assert_eq!(series.vals(), &[10.0, 20.5, 30.0]);
    }

    #[test]
    fn first_line_is_data() {
        let series = parse("1234\n").unwrap();
        assert_eq!(series.vals(), &[1234.0]);
    }

    #[test]
    fn skips_blank_lines() {
        let series = parse("1\n\n2\n   \n3").unwrap();
        assert_eq!(series.vals(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_input_is_empty_series() {
        let series = parse("").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn rejects_non_numeric_line() {
        let err = parse("1\nabc\n3\n").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("abc"), "{msg}");
    }

    #[test]
    fn rejects_extra_columns() {
        assert!(parse("1,2\n").is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(parse("NaN\n").is_err());
        assert!(parse("inf\n").is_err());
    }

    #[test]
    fn missing_file_names_path() {
        let err = Series::from_csv("tokio", "does/not/exist.csv").unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.csv"));
    }

    #[test]
    fn table_pads_shorter_series() {
        let table = Table::align(vec![
            Series::new("kqueue", vec![1.0, 2.0, 3.0]),
            Series::new("tokio", vec![4.0]),
        ]);
        assert_eq!(table.n_runs(), 3);
        assert_eq!(table.get("kqueue", 2), Some(3.0));
        assert_eq!(table.get("tokio", 0), Some(4.0));
        assert_eq!(table.get("tokio", 1), None);
        assert_eq!(table.get("epoll", 0), None);
        assert_eq!(table.value_range(), Some((1.0, 4.0)));
    }

    #[test]
    fn empty_table_has_no_range() {
        let table = Table::align(vec![Series::new("kqueue", Vec::new())]);
        assert_eq!(table.n_runs(), 0);
        assert_eq!(table.value_range(), None);
    }
}
