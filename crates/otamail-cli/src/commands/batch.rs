//! Batch processing command for multiple e-mail files.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use otamail_core::{Platform, Template};

use super::config::load_config;
use super::process::{
    format_output, read_input, record_fields, OutputFormat, Pipeline, Processed, RECORD_COLUMNS,
};

/// Extensions picked up from the glob expansion.
const EMAIL_EXTENSIONS: [&str; 3] = ["txt", "eml", "text"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of e-mail text files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = "summaries")]
    output_dir: PathBuf,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Use this platform's parser for every file
    #[arg(short, long, value_parser = Platform::from_str)]
    platform: Option<Platform>,

    /// Summary template
    #[arg(short, long, value_parser = Template::from_str)]
    template: Option<Template>,

    /// Operator name stamped on the summaries
    #[arg(long)]
    operator: Option<String>,

    /// Also write summary.csv in the output directory
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    processed: Option<Processed>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let pipeline = Pipeline::new(&config, args.platform, args.template, args.operator.clone())?;

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            EMAIL_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_file(&path, &pipeline, &args);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(processed) => results.push(FileResult {
                path,
                processed: Some(processed),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        processed: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let undetected = results
        .iter()
        .filter_map(|r| r.processed.as_ref())
        .filter(|p| p.result.reservation.platform == Platform::Direct)
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!("  Succeeded: {}", results.len() - failed);
    if undetected > 0 {
        println!("  Parsed as direct booking: {}", undetected);
    }
    if failed > 0 {
        println!("  {}", style(format!("Failed: {}", failed)).red());
    }

    Ok(())
}

fn process_file(path: &Path, pipeline: &Pipeline, args: &BatchArgs) -> anyhow::Result<Processed> {
    let text = read_input(path)?;
    if text.trim().is_empty() {
        anyhow::bail!("Empty e-mail: {}", path.display());
    }

    let processed = pipeline.run(&text);

    let output_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("email");
    let output_path = args
        .output_dir
        .join(format!("{}.{}", output_name, args.format.extension()));

    fs::write(&output_path, format_output(&processed, args.format)?)?;
    debug!("Wrote output to {}", output_path.display());

    Ok(processed)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(RECORD_COLUMNS);
    header.extend(["warnings", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let mut row = vec![filename.to_string()];
        match &result.processed {
            Some(processed) => {
                row.push("success".to_string());
                row.extend(record_fields(&processed.result.reservation));
                row.push(processed.result.warnings.len().to_string());
                row.push(result.processing_time_ms.to_string());
                row.push(String::new());
            }
            None => {
                row.push("error".to_string());
                row.extend(RECORD_COLUMNS.iter().map(|_| String::new()));
                row.push(String::new());
                row.push(result.processing_time_ms.to_string());
                row.push(result.error.clone().unwrap_or_default());
            }
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
