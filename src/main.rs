use anyhow::{bail, Context, Result};
use bernoulli_bayes::{
    binarize, compute_medians, dataset, prompt, report, FieldSpec, NaiveBayesClassifier, Query,
    Report,
};
use clap::{Parser, ValueEnum};
use std::{io, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Predict one binary field of a CSV dataset from the others with Naive Bayes
#[derive(Parser, Debug)]
#[command(name = "bernoulli-bayes")]
#[command(about = "Discrete Naive Bayes over median-split CSV fields", long_about = None)]
struct Args {
    /// CSV dataset with a header row
    #[arg(short, long)]
    data: PathBuf,

    /// JSON field specification; defaults to the built-in employee fields
    #[arg(short, long)]
    fields: Option<PathBuf>,

    /// Field to predict; asked for interactively when omitted
    #[arg(short, long)]
    target: Option<String>,

    /// Predictor value as NAME=1 or NAME=0, repeatable
    #[arg(short, long = "set", value_parser = parse_assignment)]
    set: Vec<(String, bool)>,

    /// Fail instead of prompting for missing values
    #[arg(long)]
    no_prompt: bool,

    /// Print the medians and P(field=1) for every field before predicting
    #[arg(long)]
    summary: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

fn parse_assignment(arg: &str) -> Result<(String, bool)> {
    let (name, value) = arg.split_once('=').context("expected NAME=1 or NAME=0")?;
    let value = match value.trim() {
        "1" => true,
        "0" => false,
        other => bail!("value for `{name}` must be 1 or 0, got `{other}`"),
    };
    Ok((name.trim().to_string(), value))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(args.log_level))
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let spec = match &args.fields {
        Some(path) => FieldSpec::from_path(path)
            .with_context(|| format!("failed to read field specification {}", path.display()))?,
        None => FieldSpec::employee(),
    };

    let records = dataset::load_path(&args.data)
        .with_context(|| format!("failed to load dataset {}", args.data.display()))?;
    let medians = compute_medians(&records, &spec).context("failed to compute medians")?;
    let data = binarize(&records, &spec, &medians).context("failed to binarize dataset")?;

    if args.summary {
        if !medians.is_empty() {
            println!("{}", report::medians_table(&medians));
        }
        println!("{}", report::marginals_table(&data));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let target = match args.target {
        Some(target) => target,
        None if args.no_prompt => bail!("no target given and prompting is disabled"),
        None => prompt::prompt_target(&mut input, &mut output, &spec)?,
    };

    let model = NaiveBayesClassifier::fit(&data, &target)?;
    info!("P({}=1) = {}", model.target(), model.prior());

    let preset: Query = args.set.into_iter().collect();
    let query = if args.no_prompt {
        preset
    } else {
        let predictors: Vec<&str> = model.predictors().collect();
        prompt::prompt_query(&mut input, &mut output, &predictors, preset)?
    };

    let prediction = model.predict(&query)?;
    let report = Report::new(&model, &query, prediction);
    match args.format {
        Format::Text => println!("{report}"),
        Format::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
