use approx::assert_abs_diff_eq;
use bernoulli_bayes::{
    dataset, discretize, BayesError, FieldSpec, NaiveBayesClassifier, Query, Report, Result,
};
use std::io::Write;
use tempfile::NamedTempFile;

const EMPLOYEES: &str = "\
Age,Attrition,Gender,JobSatisfaction,MonthlyIncome,OverTime
41,Yes,Female,4,5993,Yes
49,No,Male,2,5130,No
37,Yes,Male,3,2090,Yes
33,No,Female,3,2909,Yes
27,No,Male,2,3468,No
32,No,Male,4,3068,No
";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn query(pairs: &[(&str, bool)]) -> Query {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn csv_to_prediction() -> Result<()> {
    let csv = write_temp(EMPLOYEES);
    let records = dataset::load_path(csv.path())?;
    let data = discretize(&records, &FieldSpec::employee())?;

    assert_eq!(
        data.fields(),
        ["Female", "OverTime", "JobSatisfaction", "MonthlyIncome", "Attrition"]
    );
    // satisfaction median 3, income median (3068 + 3468) / 2
    assert_eq!(
        data.rows()[0],
        [true, true, true, true, true],
        "first employee is above both medians"
    );
    assert_eq!(data.rows()[2], [false, true, true, false, true]);

    let model = NaiveBayesClassifier::fit(&data, "Attrition")?;
    assert_abs_diff_eq!(model.prior(), 3.0 / 8.0);

    let overtime = model.cpt().get("OverTime").unwrap();
    assert_abs_diff_eq!(overtime.given_zero, 2.0 / 6.0);
    assert_abs_diff_eq!(overtime.given_one, 3.0 / 4.0);

    let query = query(&[
        ("Female", false),
        ("OverTime", true),
        ("JobSatisfaction", true),
        ("MonthlyIncome", false),
    ]);
    let prediction = model.predict(&query)?;
    assert!(prediction.predicted_label);

    let text = Report::new(&model, &query, prediction).to_string();
    assert!(text.contains(
        "P(Attrition=1 | Female=0, OverTime=1, JobSatisfaction=1, MonthlyIncome=0)"
    ));
    Ok(())
}

#[test]
fn target_can_be_any_field() -> Result<()> {
    let records = dataset::load_records(EMPLOYEES.as_bytes())?;
    let data = discretize(&records, &FieldSpec::employee())?;

    let model = NaiveBayesClassifier::fit(&data, "OverTime")?;
    assert_eq!(
        model.predictors().collect::<Vec<_>>(),
        ["Female", "JobSatisfaction", "MonthlyIncome", "Attrition"]
    );
    assert!(matches!(
        model.predict(&query(&[("Female", true)])),
        Err(BayesError::MissingQueryFields(_))
    ));
    Ok(())
}

#[test]
fn custom_spec_from_file() -> Result<()> {
    let spec = write_temp(
        r#"{"fields": [
            {"name": "Senior", "source": "Age", "rule": "median_threshold"},
            {"name": "Left", "source": "Attrition", "rule": "categorical", "equals": "Yes"}
        ]}"#,
    );
    let spec = FieldSpec::from_path(spec.path())?;
    let records = dataset::load_records(EMPLOYEES.as_bytes())?;
    let data = discretize(&records, &spec)?;

    // ages 27 32 33 37 41 49, median 35
    let senior: Vec<bool> = data.values("Senior")?.collect();
    assert_eq!(senior, [true, true, true, false, false, false]);

    let model = NaiveBayesClassifier::fit(&data, "Left")?;
    assert_eq!(model.cpt().len(), 1);
    Ok(())
}

#[test]
fn loader_errors() {
    let empty = write_temp("Gender,OverTime\n");
    assert!(matches!(
        dataset::load_path(empty.path()),
        Err(BayesError::EmptyDataset)
    ));

    let ragged = write_temp("Gender,OverTime\nFemale,Yes\nMale\n");
    assert!(matches!(
        dataset::load_path(ragged.path()),
        Err(BayesError::RowWidth { row: 2, expected: 2, found: 1 })
    ));

    assert!(matches!(
        dataset::load_path("/nonexistent/employees.csv"),
        Err(BayesError::Io(_))
    ));
}

#[test]
fn malformed_income_names_row() {
    let csv = EMPLOYEES.replace("3468", "n/a");
    let records = dataset::load_records(csv.as_bytes()).unwrap();

    let err = discretize(&records, &FieldSpec::employee()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "row 5: field `MonthlyIncome` has non-numeric value \"n/a\""
    );
}
