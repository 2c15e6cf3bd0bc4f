use crate::{
    dataset::BinaryDataset,
    error::{BayesError, Result},
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// P(field = 1 | target = 0) and P(field = 1 | target = 1), Laplace-smoothed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Likelihood {
    pub given_zero: f64,
    pub given_one: f64,
}

impl Likelihood {
    /// P(field = 1 | target = label)
    pub fn given(&self, label: bool) -> f64 {
        if label {
            self.given_one
        } else {
            self.given_zero
        }
    }
}

/// Conditional probability table, one entry per predictor in field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cpt {
    entries: Vec<(String, Likelihood)>,
}

impl Cpt {
    pub fn get(&self, field: &str) -> Option<&Likelihood> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, likelihood)| likelihood)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Likelihood)> {
        self.entries
            .iter()
            .map(|(name, likelihood)| (name.as_str(), likelihood))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Laplace smoothing over two outcomes: never 0, never 1, never a division by zero.
fn smoothed(hits: usize, total: usize) -> f64 {
    (hits as f64 + 1.0) / (total as f64 + 2.0)
}

/// P(target = 1) = (count(target = 1) + 1) / (N + 2)
pub fn compute_prior(data: &BinaryDataset, target: &str) -> Result<f64> {
    let ones = data.values(target)?.filter(|&value| value).count();
    Ok(smoothed(ones, data.len()))
}

/// Counts each predictor against both target outcomes.
pub fn compute_cpt(data: &BinaryDataset, target: &str, predictors: &[&str]) -> Result<Cpt> {
    let target_column = data.column(target)?;

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(predictors.len());
    for &predictor in predictors {
        let column = data.column(predictor)?;
        if !seen.insert(column) {
            return Err(BayesError::Config(format!("predictor `{predictor}` listed twice")));
        }
        if column == target_column {
            return Err(BayesError::Config(format!(
                "`{target}` cannot be both target and predictor"
            )));
        }

        // [target = 0, target = 1]
        let mut target_counts = [0usize; 2];
        let mut predictor_counts = [0usize; 2];
        for row in data.rows() {
            let label = row[target_column] as usize;
            target_counts[label] += 1;
            if row[column] {
                predictor_counts[label] += 1;
            }
        }

        let likelihood = Likelihood {
            given_zero: smoothed(predictor_counts[0], target_counts[0]),
            given_one: smoothed(predictor_counts[1], target_counts[1]),
        };
        debug!(
            field = predictor,
            given_zero = likelihood.given_zero,
            given_one = likelihood.given_one,
            "estimated likelihood"
        );
        entries.push((predictor.to_string(), likelihood));
    }

    Ok(Cpt { entries })
}

/// A fitted model for one target field. Fitting for another target needs a new model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaiveBayesClassifier {
    target: String,
    prior: f64,
    cpt: Cpt,
}

impl NaiveBayesClassifier {
    /// Fits `target` against every other field of the dataset.
    pub fn fit(data: &BinaryDataset, target: &str) -> Result<Self> {
        let predictors: Vec<&str> = data
            .fields()
            .iter()
            .map(String::as_str)
            .filter(|&field| field != target)
            .collect();
        Self::fit_with(data, target, &predictors)
    }

    /// Fits `target` against an explicit subset of predictor fields.
    pub fn fit_with(data: &BinaryDataset, target: &str, predictors: &[&str]) -> Result<Self> {
        let prior = compute_prior(data, target)?;
        let cpt = compute_cpt(data, target, predictors)?;
        info!(
            target_field = target,
            prior,
            predictors = cpt.len(),
            records = data.len(),
            "fitted model"
        );

        Ok(NaiveBayesClassifier {
            target: target.to_string(),
            prior,
            cpt,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Smoothed P(target = 1).
    pub fn prior(&self) -> f64 {
        self.prior
    }

    pub fn cpt(&self) -> &Cpt {
        &self.cpt
    }

    pub fn predictors(&self) -> impl Iterator<Item = &str> {
        self.cpt.iter().map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn dataset(fields: &[&str], rows: &[&[u8]]) -> BinaryDataset {
        BinaryDataset::new(
            fields.iter().map(|f| f.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|&v| v == 1).collect())
                .collect(),
        )
        .unwrap()
    }

    fn attrition() -> BinaryDataset {
        dataset(
            &["Female", "OverTime", "Attrition"],
            &[&[1, 0, 1], &[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
        )
    }

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<NaiveBayesClassifier>();
        has_autotraits::<Cpt>();
    }

    #[test]
    fn prior_is_laplace_smoothed() -> Result<()> {
        let rows: Vec<Vec<u8>> = (0..10).map(|i| vec![u8::from(i < 4), 0]).collect();
        let rows: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
        let data = dataset(&["Target", "X"], &rows);

        assert_abs_diff_eq!(compute_prior(&data, "Target")?, 5.0 / 12.0);
        Ok(())
    }

    #[test]
    fn cpt_counts_per_outcome() -> Result<()> {
        let cpt = compute_cpt(&attrition(), "Attrition", &["Female", "OverTime"])?;

        let female = cpt.get("Female").unwrap();
        assert_abs_diff_eq!(female.given_zero, 0.25);
        assert_abs_diff_eq!(female.given_one, 0.75);

        let overtime = cpt.get("OverTime").unwrap();
        assert_abs_diff_eq!(overtime.given_zero, 0.5);
        assert_abs_diff_eq!(overtime.given_one, 0.5);

        assert_eq!(
            cpt.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            ["Female", "OverTime"]
        );
        Ok(())
    }

    #[test]
    fn constant_columns_stay_inside_unit_interval() -> Result<()> {
        let all_ones = dataset(&["X", "Y"], &[&[1, 1], &[1, 1], &[1, 1]]);
        let all_zeros = dataset(&["X", "Y"], &[&[0, 0], &[0, 0], &[0, 0]]);

        for data in [all_ones, all_zeros] {
            let model = NaiveBayesClassifier::fit(&data, "Y")?;
            assert!(model.prior() > 0.0 && model.prior() < 1.0);
            for (_, likelihood) in model.cpt().iter() {
                for p in [likelihood.given_zero, likelihood.given_one] {
                    assert!(p > 0.0 && p < 1.0, "{p}");
                }
            }
        }

        // Target never 0: the y = 0 column falls back to 1 / 2.
        let model = NaiveBayesClassifier::fit(&dataset(&["X", "Y"], &[&[1, 1], &[0, 1]]), "Y")?;
        assert_abs_diff_eq!(model.cpt().get("X").unwrap().given_zero, 0.5);
        assert_abs_diff_eq!(model.prior(), 0.75);
        Ok(())
    }

    #[test]
    fn fit_uses_remaining_fields() -> Result<()> {
        let model = NaiveBayesClassifier::fit(&attrition(), "OverTime")?;
        assert_eq!(model.target(), "OverTime");
        assert_eq!(model.predictors().collect::<Vec<_>>(), ["Female", "Attrition"]);
        assert_abs_diff_eq!(model.prior(), 0.5);
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            compute_prior(&attrition(), "Age"),
            Err(BayesError::UnknownField(name)) if name == "Age"
        ));
        assert!(matches!(
            compute_cpt(&attrition(), "Attrition", &["Age"]),
            Err(BayesError::UnknownField(_))
        ));
        assert!(matches!(
            compute_cpt(&attrition(), "Attrition", &["Attrition"]),
            Err(BayesError::Config(_))
        ));
    }

    #[test]
    fn repeated_predictor_is_rejected() {
        let err = NaiveBayesClassifier::fit_with(&attrition(), "Attrition", &["Female", "Female"])
            .unwrap_err();
        assert!(
            matches!(err, BayesError::Config(ref msg) if msg.contains("`Female`")),
            "{err}"
        );
    }
}
