//! Process command - turn a single e-mail into a PMS summary.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use otamail_core::models::config::OtamailConfig;
use otamail_core::{
    ExtractionResult, Platform, Reservation, ReservationExtractor, SummaryRenderer, Template,
};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// E-mail text file, or "-" to read stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Use this platform's parser instead of detecting it
    #[arg(short, long, value_parser = Platform::from_str)]
    platform: Option<Platform>,

    /// Summary template
    #[arg(short, long, value_parser = Template::from_str)]
    template: Option<Template>,

    /// Operator name stamped on the summary
    #[arg(long)]
    operator: Option<String>,

    /// Show extracted fields and warnings
    #[arg(long)]
    show_fields: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Summary text, ready to paste
    Text,
    /// Reservation record with its summary
    Json,
    /// CSV header and one row
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Extraction and rendering settings shared by `process` and `batch`.
pub struct Pipeline {
    extractor: ReservationExtractor,
    renderer: SummaryRenderer,
    operator: String,
}

/// One parsed e-mail and its rendered summary.
pub struct Processed {
    pub result: ExtractionResult,
    pub summary: String,
}

impl Pipeline {
    /// Command-line values win over the configuration.
    pub fn new(
        config: &OtamailConfig,
        platform: Option<Platform>,
        template: Option<Template>,
        operator: Option<String>,
    ) -> anyhow::Result<Self> {
        let operator = match operator.or_else(|| config.render.operator.clone()) {
            Some(name) if !name.trim().is_empty() => name,
            _ => anyhow::bail!(
                "No operator name given. Pass --operator or set render.operator in the config."
            ),
        };

        let mut extractor = ReservationExtractor::from_config(&config.extraction);
        if platform.is_some() {
            extractor = extractor.with_platform(platform);
        }

        let mut renderer = SummaryRenderer::from_config(&config.render);
        if let Some(template) = template {
            renderer = renderer.with_template(template);
        }

        Ok(Self {
            extractor,
            renderer,
            operator,
        })
    }

    pub fn run(&self, text: &str) -> Processed {
        let result = self.extractor.extract(text);
        let summary = self.renderer.render(&result.reservation, &self.operator);
        Processed { result, summary }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    reservation: &'a Reservation,
    summary: &'a str,
    detected: bool,
    warnings: &'a [String],
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = Pipeline::new(&config, args.platform, args.template, args.operator)?;

    info!("Processing {}", args.input.display());
    let text = read_input(&args.input)?;
    let processed = pipeline.run(&text);

    let output = format_output(&processed, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_fields {
        show_fields(&processed.result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read an e-mail from a file, or from stdin for `-`.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let bytes = fs::read(input)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn format_output(processed: &Processed, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(processed.summary.clone()),
        OutputFormat::Json => {
            let output = JsonOutput {
                reservation: &processed.result.reservation,
                summary: &processed.summary,
                detected: processed.result.detected,
                warnings: &processed.result.warnings,
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Csv => format_csv(&processed.result.reservation),
    }
}

/// Columns shared by the CSV output and the batch summary.
pub const RECORD_COLUMNS: [&str; 11] = [
    "platform",
    "reservation_id",
    "guest_name",
    "arrival",
    "departure",
    "nights",
    "tarif",
    "vad",
    "commission",
    "virtual_card",
    "card",
];

pub fn record_fields(record: &Reservation) -> [String; 11] {
    let amount = |value: Option<rust_decimal::Decimal>| {
        value
            .map(|v| format!("{:.2}", v.round_dp(2)))
            .unwrap_or_default()
    };

    [
        record.platform.id().to_string(),
        record.reservation_id.clone().unwrap_or_default(),
        record.guest_name.clone().unwrap_or_default(),
        record.arrival.clone().unwrap_or_default(),
        record.departure.clone().unwrap_or_default(),
        record.nights.map(|n| n.to_string()).unwrap_or_default(),
        amount(record.tarif),
        amount(record.vad),
        amount(record.commission),
        record.is_virtual_card.to_string(),
        record.card.clone().unwrap_or_default(),
    ]
}

fn format_csv(record: &Reservation) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(RECORD_COLUMNS)?;
    wtr.write_record(record_fields(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn show_fields(result: &ExtractionResult) {
    let record = &result.reservation;

    eprintln!();
    eprintln!(
        "{} Platform: {} ({})",
        style("ℹ").blue(),
        record.platform_name(),
        if result.detected { "detected" } else { "forced" }
    );
    for (column, value) in RECORD_COLUMNS.iter().zip(record_fields(record)) {
        if !value.is_empty() {
            eprintln!("  {:<15} {}", column, value);
        }
    }

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    eprintln!(
        "{} Processing time: {}ms",
        style("ℹ").blue(),
        result.processing_time_ms
    );
}
