use crate::error::{BayesError, Result};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::Read,
    path::Path,
};
use tracing::info;

/// One input row: raw column name to raw string value.
pub type RawRecord = HashMap<String, String>;

/// Reads CSV text with a header row into raw records.
///
/// Repeated header names, rows whose width differs from the header and inputs with no data
/// rows are errors.
pub fn load_records<R: Read>(input: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let mut seen = HashSet::new();
    if let Some(dup) = headers.iter().find(|header| !seen.insert(*header)) {
        return Err(BayesError::DuplicateColumn(dup.to_string()));
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                if let csv::ErrorKind::UnequalLengths {
                    pos,
                    expected_len,
                    len,
                } = err.kind()
                {
                    return Err(BayesError::RowWidth {
                        // Record 0 is the header, so the record index is the 1-based data row.
                        row: pos
                            .as_ref()
                            .map_or(records.len() + 1, |p| p.record() as usize),
                        expected: *expected_len as usize,
                        found: *len as usize,
                    });
                }
                return Err(err.into());
            }
        };

        records.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect(),
        );
    }

    if records.is_empty() {
        return Err(BayesError::EmptyDataset);
    }

    info!(rows = records.len(), columns = headers.len(), "loaded dataset");
    Ok(records)
}

pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    load_records(File::open(path)?)
}

/// Binarized records in column order: `rows[i][j]` is field `fields[j]` of record `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryDataset {
    fields: Vec<String>,
    rows: Vec<Vec<bool>>,
}

impl BinaryDataset {
    pub fn new(fields: Vec<String>, rows: Vec<Vec<bool>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(BayesError::EmptyDataset);
        }

        let mut seen = HashSet::new();
        if let Some(dup) = fields.iter().find(|field| !seen.insert(field.as_str())) {
            return Err(BayesError::Config(format!("field `{dup}` declared twice")));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != fields.len() {
                return Err(BayesError::RowWidth {
                    row: i + 1,
                    expected: fields.len(),
                    found: row.len(),
                });
            }
        }

        Ok(BinaryDataset { fields, rows })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|field| field == name)
            .ok_or_else(|| BayesError::UnknownField(name.to_string()))
    }

    /// Values of one field across every record.
    pub fn values<'a>(&'a self, name: &str) -> Result<impl Iterator<Item = bool> + 'a> {
        let column = self.column(name)?;
        Ok(self.rows.iter().map(move |row| row[column]))
    }

    /// Unsmoothed P(field = 1) for every field, in column order.
    pub fn marginals(&self) -> Vec<(&str, f64)> {
        let total = self.rows.len() as f64;
        self.fields
            .iter()
            .enumerate()
            .map(|(column, field)| {
                let ones = self.rows.iter().filter(|row| row[column]).count();
                (field.as_str(), ones as f64 / total)
            })
            .collect()
    }
}
