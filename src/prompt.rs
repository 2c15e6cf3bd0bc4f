use crate::{
    error::{BayesError, Result},
    fields::FieldSpec,
    inference::Query,
};
use std::io::{self, BufRead, Write};

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(BayesError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        )));
    }
    Ok(line.trim().to_string())
}

/// Asks which field to predict until the answer names a field of `spec`.
pub fn prompt_target<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    spec: &FieldSpec,
) -> Result<String> {
    let choices = spec.names().collect::<Vec<_>>().join(", ");
    loop {
        let question = format!("What do you want to predict? ({choices}) ");
        let answer = read_answer(input, output, &question)?;
        if spec.contains(&answer) {
            return Ok(answer);
        }
        writeln!(output, "`{answer}` is not one of: {choices}")?;
    }
}

/// Fills every predictor missing from `preset` by asking for 1 or 0.
pub fn prompt_query<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    predictors: &[&str],
    mut preset: Query,
) -> Result<Query> {
    for &field in predictors {
        if preset.contains_key(field) {
            continue;
        }
        let value = loop {
            match read_answer(input, output, &format!("Enter 1 or 0 for {field}. "))?.as_str() {
                "1" => break true,
                "0" => break false,
                other => writeln!(output, "`{other}` is not 1 or 0")?,
            }
        };
        preset.insert(field.to_string(), value);
    }
    Ok(preset)
}
