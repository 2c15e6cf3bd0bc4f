use crate::{
    bayes::NaiveBayesClassifier,
    dataset::BinaryDataset,
    discretize::MedianTable,
    error::Result,
    inference::{Prediction, Query},
};
use serde::Serialize;
use std::fmt;

/// A prediction together with the query it answered, ready for display.
pub struct Report<'a> {
    model: &'a NaiveBayesClassifier,
    query: &'a Query,
    prediction: Prediction,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    query: Vec<(&'a str, u8)>,
    p_target_one: f64,
    p_target_zero: f64,
    predicted_label: u8,
}

impl<'a> Report<'a> {
    pub fn new(model: &'a NaiveBayesClassifier, query: &'a Query, prediction: Prediction) -> Self {
        Report {
            model,
            query,
            prediction,
        }
    }

    // Query values in model predictor order.
    fn evidence(&self) -> Vec<(&'a str, bool)> {
        self.model
            .predictors()
            .filter_map(|field| self.query.get(field).map(|&value| (field, value)))
            .collect()
    }

    /// `Female=1, OverTime=0`
    pub fn notation(&self) -> String {
        self.evidence()
            .iter()
            .map(|(field, value)| format!("{field}={}", u8::from(*value)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `Female is true, OverTime is false`
    pub fn words(&self) -> String {
        self.evidence()
            .iter()
            .map(|(field, value)| format!("{field} is {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            target: self.model.target(),
            query: self
                .evidence()
                .into_iter()
                .map(|(field, value)| (field, u8::from(value)))
                .collect(),
            p_target_one: self.prediction.p_target_one,
            p_target_zero: self.prediction.p_target_zero,
            predicted_label: u8::from(self.prediction.predicted_label),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.model.target();
        let words = self.words();
        let notation = self.notation();

        writeln!(f, "Probability of {target} being true given {words}")?;
        writeln!(
            f,
            "= P({target}=1 | {notation}) = {}",
            self.prediction.p_target_one
        )?;
        writeln!(f, "Probability of {target} being false given {words}")?;
        writeln!(
            f,
            "= P({target}=0 | {notation}) = {}",
            self.prediction.p_target_zero
        )?;
        write!(
            f,
            "Final Prediction: {target} is {}",
            self.prediction.predicted_label
        )
    }
}

/// One line per field: `P(Female=1) = 0.4000`.
pub fn marginals_table(data: &BinaryDataset) -> String {
    data.marginals()
        .iter()
        .map(|(field, p)| format!("P({field}=1) = {p:.4}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per median-split field: `median(MonthlyIncome) = 4919`.
pub fn medians_table(medians: &MedianTable) -> String {
    medians
        .iter()
        .map(|(field, median)| format!("median({field}) = {median}"))
        .collect::<Vec<_>>()
        .join("\n")
}
