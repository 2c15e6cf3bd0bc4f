use crate::error::{BayesError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

/// How a raw string value becomes a 0/1 feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldRule {
    /// 1 iff the raw value equals `equals` exactly.
    Categorical { equals: String },
    /// 1 iff the raw integer is at least the dataset median of the field.
    MedianThreshold,
}

/// One field of the specification: canonical name, raw column it is read from, and rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(flatten)]
    pub rule: FieldRule,
}

impl FieldDef {
    pub fn categorical(name: &str, equals: &str) -> Self {
        FieldDef {
            name: name.to_string(),
            source: None,
            rule: FieldRule::Categorical {
                equals: equals.to_string(),
            },
        }
    }

    pub fn median_threshold(name: &str) -> Self {
        FieldDef {
            name: name.to_string(),
            source: None,
            rule: FieldRule::MedianThreshold,
        }
    }

    /// Reads the field from a differently named raw column.
    pub fn from_column(mut self, column: &str) -> Self {
        self.source = Some(column.to_string());
        self
    }

    /// Raw column the value is read from; the canonical name unless renamed.
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Deserialize)]
struct FieldSpecDocument {
    fields: Vec<FieldDef>,
}

/// Ordered, validated list of fields. Any field can later be chosen as the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    fields: Vec<FieldDef>,
}

impl FieldSpec {
    pub fn new(fields: Vec<FieldDef>) -> Result<Self> {
        // One target plus at least one predictor.
        if fields.len() < 2 {
            return Err(BayesError::Config(format!(
                "need at least two fields, got {}",
                fields.len()
            )));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.is_empty() {
                return Err(BayesError::Config("field with empty name".to_string()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(BayesError::Config(format!(
                    "field `{}` declared twice",
                    field.name
                )));
            }
        }

        Ok(FieldSpec { fields })
    }

    /// Parses a JSON document of the form `{"fields": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: FieldSpecDocument =
            serde_json::from_str(json).map_err(|e| BayesError::Config(e.to_string()))?;
        Self::new(document.fields)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// The employee attrition fields the tool was first written for.
    pub fn employee() -> Self {
        FieldSpec {
            fields: vec![
                FieldDef::categorical("Female", "Female").from_column("Gender"),
                FieldDef::categorical("OverTime", "Yes"),
                FieldDef::median_threshold("JobSatisfaction"),
                FieldDef::median_threshold("MonthlyIncome"),
                FieldDef::categorical("Attrition", "Yes"),
            ],
        }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All fields except `target`, in declaration order.
    pub fn predictors(&self, target: &str) -> Result<Vec<&str>> {
        if !self.contains(target) {
            return Err(BayesError::UnknownField(target.to_string()));
        }
        Ok(self.names().filter(|&name| name != target).collect())
    }
}
