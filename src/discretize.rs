use crate::{
    dataset::{BinaryDataset, RawRecord},
    error::{BayesError, Result},
    fields::{FieldDef, FieldRule, FieldSpec},
};
use tracing::debug;

/// Median of every median-threshold field, computed on the raw integers, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedianTable {
    medians: Vec<(String, f64)>,
}

impl MedianTable {
    pub fn get(&self, field: &str) -> Option<f64> {
        self.medians
            .iter()
            .find(|(name, _)| name == field)
            .map(|&(_, median)| median)
    }

    pub fn len(&self) -> usize {
        self.medians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medians.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.medians.iter().map(|(field, median)| (field.as_str(), *median))
    }
}

/// Middle value of the sorted input, or the mean of the two middle values for even lengths.
pub fn median(values: &[i64]) -> Result<f64> {
    if values.is_empty() {
        return Err(BayesError::EmptyDataset);
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid] as f64)
    } else {
        Ok((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
    }
}

fn raw_value<'a>(record: &'a RawRecord, field: &FieldDef, row: usize) -> Result<&'a str> {
    record
        .get(field.source())
        .map(String::as_str)
        .ok_or_else(|| BayesError::MissingColumn {
            column: field.source().to_string(),
            row,
        })
}

fn parse_integer(record: &RawRecord, field: &FieldDef, row: usize) -> Result<i64> {
    let raw = raw_value(record, field, row)?;
    raw.trim()
        .parse()
        .map_err(|_| BayesError::MalformedNumber {
            field: field.name.clone(),
            row,
            value: raw.to_string(),
        })
}

pub fn compute_medians(records: &[RawRecord], spec: &FieldSpec) -> Result<MedianTable> {
    if records.is_empty() {
        return Err(BayesError::EmptyDataset);
    }

    let mut medians = Vec::new();
    for field in spec.fields() {
        if field.rule != FieldRule::MedianThreshold {
            continue;
        }

        let values = records
            .iter()
            .enumerate()
            .map(|(i, record)| parse_integer(record, field, i + 1))
            .collect::<Result<Vec<_>>>()?;

        let median = median(&values)?;
        debug!(field = %field.name, median, "computed median");
        medians.push((field.name.clone(), median));
    }

    Ok(MedianTable { medians })
}

/// Converts raw records into 0/1 features, one column per field of `spec`, in order.
pub fn binarize(
    records: &[RawRecord],
    spec: &FieldSpec,
    medians: &MedianTable,
) -> Result<BinaryDataset> {
    let mut rows = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let row = i + 1;
        let values = spec
            .fields()
            .iter()
            .map(|field| match &field.rule {
                FieldRule::Categorical { equals } => Ok(raw_value(record, field, row)? == equals),
                FieldRule::MedianThreshold => {
                    let threshold = medians.get(&field.name).ok_or_else(|| {
                        BayesError::Config(format!("no median computed for `{}`", field.name))
                    })?;
                    Ok(parse_integer(record, field, row)? as f64 >= threshold)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(values);
    }

    BinaryDataset::new(spec.names().map(str::to_string).collect(), rows)
}

/// Computes the median table and binarizes in one step.
pub fn discretize(records: &[RawRecord], spec: &FieldSpec) -> Result<BinaryDataset> {
    let medians = compute_medians(records, spec)?;
    binarize(records, spec, &medians)
}
