//! Discrete Naive Bayes over a configurable set of binary fields.
//!
//! Raw CSV rows are binarized per a [`FieldSpec`] (exact-match or median-threshold rules),
//! then one field is predicted from all the others with Laplace-smoothed estimates.

pub mod bayes;
pub mod dataset;
pub mod discretize;
pub mod error;
pub mod fields;
pub mod inference;
pub mod prompt;
pub mod report;

pub use bayes::{compute_cpt, compute_prior, Cpt, Likelihood, NaiveBayesClassifier};
pub use dataset::{BinaryDataset, RawRecord};
pub use discretize::{binarize, compute_medians, discretize, median, MedianTable};
pub use error::{BayesError, Result};
pub use fields::{FieldDef, FieldRule, FieldSpec};
pub use inference::{Prediction, Query};
pub use report::Report;
