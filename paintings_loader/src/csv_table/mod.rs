//! Reading a CSV file into memory, with inferred column types.

use std::{
    collections::HashSet,
    fs::File,
    io::{self, Read},
    path::Path,
};

use crate::common::*;

mod infer;

use self::infer::TypeCandidate;
pub(crate) use self::infer::{DataType, Value};

/// A column in a [`CsvTable`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Column {
    /// The name from the CSV header.
    pub(crate) name: String,
    /// The type inferred from the column's cells.
    pub(crate) data_type: DataType,
}

/// The full contents of a CSV file. Every row has exactly one value per
/// column.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CsvTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl CsvTable {
    /// Read the CSV file at `path`.
    #[instrument(level = "debug", fields(path = %path.display()))]
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(format_err!("source file {} does not exist", path.display()));
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("could not open {}", path.display()));
            }
        };
        let table = Self::from_reader(file)
            .with_context(|| format!("could not read CSV file {}", path.display()))?;
        debug!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            "read CSV file"
        );
        Ok(table)
    }

    /// Read CSV data with a header row from `rdr`.
    pub(crate) fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(rdr);

        let headers = rdr.headers().context("could not read CSV header")?.clone();
        if headers.is_empty() {
            return Err(format_err!("CSV data has no header row"));
        }
        let mut seen = HashSet::new();
        for (idx, name) in headers.iter().enumerate() {
            if name.is_empty() {
                return Err(format_err!("CSV header column {} has no name", idx + 1));
            }
            if !seen.insert(name) {
                return Err(format_err!("CSV header contains {:?} twice", name));
            }
        }

        // We need every cell before we can decide a column's type, so keep the
        // raw records around until we've seen them all.
        let mut candidates = vec![TypeCandidate::default(); headers.len()];
        let mut records = vec![];
        for record in rdr.records() {
            let record = record.context("could not parse CSV record")?;
            for (candidate, cell) in candidates.iter_mut().zip(record.iter()) {
                candidate.observe(cell);
            }
            records.push(record);
        }

        let columns = headers
            .iter()
            .zip(&candidates)
            .map(|(name, candidate)| Column {
                name: name.to_owned(),
                data_type: candidate.decide(),
            })
            .collect::<Vec<_>>();
        for column in &columns {
            trace!(column = %column.name, data_type = %column.data_type, "inferred type");
        }

        let rows = records
            .iter()
            .map(|record| {
                record
                    .iter()
                    .zip(&columns)
                    .map(|(cell, column)| {
                        Value::parse(cell, column.data_type).with_context(|| {
                            format!("bad value in column {:?}", column.name)
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CsvTable { columns, rows })
    }

    /// Our columns, in header order.
    pub(crate) fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Our rows, in file order.
    pub(crate) fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// The names of our columns, in header order.
    pub(crate) fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| &c.name[..])
    }
}
