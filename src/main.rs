//! Survey Reliability CLI
//!
//! Runs one analysis job and prints a run summary.
//!
//! ```bash
//! survey-reliability --config job.yaml
//! survey-reliability --input survey.xlsx --items 0-35 \
//!     --dimension "Planning=0-11" --dimension "Delivery=12-35"
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use survey_reliability::adapters::{
    CalamineSpreadsheetReader, TracingDiagnosticSink, XlsxReportWriter,
};
use survey_reliability::application::{AnalyzeSurveyHandler, AnalyzeSurveyResult};
use survey_reliability::config::{AppConfig, DimensionConfig, LogFormat, LoggingConfig};
use survey_reliability::domain::foundation::Timestamp;
use survey_reliability::domain::survey::ColumnSpec;

#[derive(Parser)]
#[command(name = "survey-reliability")]
#[command(about = "Reliability and construct validity report for a survey spreadsheet")]
#[command(version)]
struct Cli {
    /// Path to a configuration file (TOML, YAML or JSON)
    #[arg(long, short, env = "SURVEY_RELIABILITY_CONFIG")]
    config: Option<PathBuf>,

    /// Survey workbook to analyse
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Worksheet name (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// 0-based item columns, e.g. "0-35" or "0,2,4-9"
    #[arg(long)]
    items: Option<ColumnSpec>,

    /// Dimension as NAME=COLUMNS, repeatable; replaces configured dimensions
    #[arg(long = "dimension", short = 'd', value_parser = parse_dimension)]
    dimensions: Vec<DimensionConfig>,

    /// Directory the report is written into
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Report file name
    #[arg(long)]
    file_name: Option<String>,

    /// Decimal places for reported statistics
    #[arg(long)]
    decimal_places: Option<u32>,

    /// Print the run summary to stdout
    #[arg(long, value_enum)]
    summary: Option<SummaryFormat>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SummaryFormat {
    Json,
    Yaml,
}

impl Cli {
    /// Command line values take precedence over file and environment values.
    fn apply(self, config: &mut AppConfig) {
        if let Some(input) = self.input {
            config.job.input_path = Some(input);
        }
        if let Some(sheet) = self.sheet {
            config.job.sheet = Some(sheet);
        }
        if let Some(items) = self.items {
            config.job.item_columns = items;
        }
        if !self.dimensions.is_empty() {
            config.job.dimensions = self.dimensions;
        }
        if let Some(dir) = self.output_dir {
            config.report.output_dir = dir;
        }
        if let Some(name) = self.file_name {
            config.report.file_name = name;
        }
        if let Some(places) = self.decimal_places {
            config.report.decimal_places = places;
        }
    }
}

fn parse_dimension(raw: &str) -> Result<DimensionConfig, String> {
    let (name, columns) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=COLUMNS, got '{}'", raw))?;
    let columns: ColumnSpec = columns.parse().map_err(|e| format!("{}", e))?;
    Ok(DimensionConfig {
        name: name.trim().to_string(),
        columns,
    })
}

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn print_summary(result: &AnalyzeSurveyResult, format: SummaryFormat) -> Result<()> {
    let rendered = match format {
        SummaryFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to render JSON summary")?
        }
        SummaryFormat::Yaml => {
            serde_yaml::to_string(result).context("Failed to render YAML summary")?
        }
    };
    println!("{}", rendered);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let summary = cli.summary;

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging);

    let command = config.to_command(&Timestamp::now())?;
    let handler = AnalyzeSurveyHandler::new(
        Arc::new(CalamineSpreadsheetReader::new()),
        Arc::new(XlsxReportWriter::new()),
        Arc::new(TracingDiagnosticSink::new()),
    );

    let input = command.input_path.display().to_string();
    let result = handler
        .handle(command)
        .with_context(|| format!("Analysis of {} failed", input))?;

    match summary {
        Some(format) => print_summary(&result, format)?,
        None => eprintln!("Report written to {}", result.output_path.display()),
    }
    Ok(())
}
