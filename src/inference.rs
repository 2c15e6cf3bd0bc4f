//! Querying a fitted [`NaiveBayesClassifier`].
//!
//! The two probabilities in a [`Prediction`] are joint probabilities
//! P(target = y, evidence), **not** the posterior P(target = y | evidence). They are left
//! unnormalized, so `p_target_one + p_target_zero` is generally not 1. Only their relative
//! order is meaningful: it decides the predicted label.

use crate::{
    bayes::NaiveBayesClassifier,
    error::{BayesError, Result},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Observed value of every predictor field, keyed by field name.
pub type Query = BTreeMap<String, bool>;

/// Outcome of one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// P(target = 1, evidence), unnormalized.
    pub p_target_one: f64,
    /// P(target = 0, evidence), unnormalized.
    pub p_target_zero: f64,
    /// `true` iff `p_target_one > p_target_zero`; exact ties go to `false`.
    pub predicted_label: bool,
}

impl NaiveBayesClassifier {
    /// Checks that `query` holds exactly the predictor fields of the model.
    pub fn validate_query(&self, query: &Query) -> Result<()> {
        let missing: Vec<String> = self
            .predictors()
            .filter(|field| !query.contains_key(*field))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(BayesError::MissingQueryFields(missing));
        }

        let unexpected: Vec<String> = query
            .keys()
            .filter(|field| self.cpt().get(field).is_none())
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            return Err(BayesError::UnexpectedQueryFields(unexpected));
        }

        Ok(())
    }

    /// Unnormalized P(target = label, evidence) under the independence assumption.
    fn joint_probability(&self, query: &Query, label: bool) -> f64 {
        let prior = if label { self.prior() } else { 1.0 - self.prior() };
        self.cpt().iter().fold(prior, |acc, (field, likelihood)| {
            let p = likelihood.given(label);
            if query[field] {
                acc * p
            } else {
                acc * (1.0 - p)
            }
        })
    }

    pub fn predict(&self, query: &Query) -> Result<Prediction> {
        self.validate_query(query)?;

        let p_target_one = self.joint_probability(query, true);
        let p_target_zero = self.joint_probability(query, false);

        Ok(Prediction {
            p_target_one,
            p_target_zero,
            predicted_label: p_target_one > p_target_zero,
        })
    }
}
