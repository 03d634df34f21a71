//! Batch command - run extraction over many samples and write a report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use sigex_core::{EnrichmentMode, ExtractionRecord, MethodsExtractor, ParameterExtractor};

use super::load_config;

/// Samples used when neither a glob nor a lines file is given.
pub const BUILTIN_SAMPLES: [&str; 7] = [
    "We used Welch's method with nperseg=1024 and window='hann' and a bandpass of 1-40 Hz.",
    "Power spectra were computed (FFT) after bandpass filtering 0.5 to 30 Hz.",
    "Data were sampled at fs = 1 kHz and stored in data/subject1/session1.csv.",
    "We applied a 1\u{2013}45 Hz band-pass (butterworth) prior to analysis.",
    "Sampling rate was 2048Hz and ICA was performed to remove artifacts.",
    "Signals were downsampled to 250 Hz (sampling rate) and then Welch nperseg: 512.",
    "EEG files at C:\\data\\subj.mat were loaded; filtering 0.1 to 100 Hz.",
];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input text files
    #[arg(conflicts_with = "lines")]
    input: Option<String>,

    /// File with one sample per line
    #[arg(short, long)]
    lines: Option<PathBuf>,

    /// Report path
    #[arg(short, long, default_value = "diagnose_report.json")]
    output: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ReportFormat,

    /// Run the rule-based detectors only
    #[arg(long)]
    no_enrichment: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// JSON report
    Json,
    /// CSV report, one row per sample
    Csv,
}

/// One piece of text to extract from.
struct Sample {
    source: String,
    text: String,
}

#[derive(Serialize)]
struct ReportEntry<'a> {
    source: &'a str,
    text: &'a str,
    extraction: ExtractionRecord,
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    entries: &'a [ReportEntry<'a>],
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_enrichment {
        config.extraction.enrichment = EnrichmentMode::None;
    }

    let mut failed: Vec<(String, String)> = Vec::new();
    let samples = collect_samples(&args, &mut failed)?;

    if samples.is_empty() {
        anyhow::bail!("No samples to process");
    }

    println!(
        "{} Found {} samples to process",
        style("ℹ").blue(),
        samples.len()
    );

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} samples")?
            .progress_chars("=>-"),
    );

    let extractor = MethodsExtractor::from_config(&config.extraction);
    info!("Running batch with {:?}", extractor);

    let mut entries = Vec::with_capacity(samples.len());
    for sample in &samples {
        let extraction = extractor.extract(&sample.text);
        debug!("{}: confidence {:.3}", sample.source, extraction.confidence);
        entries.push(ReportEntry {
            source: &sample.source,
            text: &sample.text,
            extraction,
        });
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    match args.format {
        ReportFormat::Json => write_json_report(&args.output, &entries, config.output.pretty)?,
        ReportFormat::Csv => write_csv_report(&args.output, &entries)?,
    }

    let mean_confidence =
        entries.iter().map(|e| e.extraction.confidence).sum::<f64>() / entries.len() as f64;

    println!();
    println!(
        "{} Wrote {} entries to {} in {:?}",
        style("✓").green(),
        entries.len(),
        args.output.display(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, mean confidence {:.3}",
        style(entries.len()).green(),
        style(failed.len()).red(),
        mean_confidence
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed inputs:").red());
        for (source, error) in &failed {
            println!("  - {}: {}", source, error);
        }
    }

    Ok(())
}

fn collect_samples(args: &BatchArgs, failed: &mut Vec<(String, String)>) -> anyhow::Result<Vec<Sample>> {
    if let Some(pattern) = &args.input {
        let files: Vec<PathBuf> = glob(pattern)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();

        if files.is_empty() {
            anyhow::bail!("No matching files found for pattern: {}", pattern);
        }

        let mut samples = Vec::with_capacity(files.len());
        for path in files {
            match fs::read_to_string(&path) {
                Ok(text) => samples.push(Sample {
                    source: path.display().to_string(),
                    text,
                }),
                Err(e) if args.continue_on_error => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    failed.push((path.display().to_string(), e.to_string()));
                }
                Err(e) => {
                    error!("Failed to read {}: {}", path.display(), e);
                    anyhow::bail!("Processing failed: {}", e);
                }
            }
        }
        return Ok(samples);
    }

    if let Some(path) = &args.lines {
        return read_lines(path);
    }

    Ok(BUILTIN_SAMPLES
        .iter()
        .enumerate()
        .map(|(i, text)| Sample {
            source: format!("builtin:{}", i + 1),
            text: (*text).to_string(),
        })
        .collect())
}

/// One sample per non-empty line, trimmed.
fn read_lines(path: &Path) -> anyhow::Result<Vec<Sample>> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| Sample {
            source: format!("{}:{}", path.display(), i + 1),
            text: line.trim().to_string(),
        })
        .collect())
}

fn write_json_report(path: &Path, entries: &[ReportEntry<'_>], pretty: bool) -> anyhow::Result<()> {
    let report = Report {
        generated_at: chrono::Utc::now().to_rfc3339(),
        entries,
    };

    let content = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    fs::write(path, content)?;

    debug!("Wrote JSON report to {}", path.display());
    Ok(())
}

fn write_csv_report(path: &Path, entries: &[ReportEntry<'_>]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["source", "text", "confidence", "extraction"])?;

    for entry in entries {
        wtr.write_record([
            entry.source.to_string(),
            entry.text.to_string(),
            format!("{:.3}", entry.extraction.confidence),
            serde_json::to_string(&entry.extraction)?,
        ])?;
    }

    wtr.flush()?;
    debug!("Wrote CSV report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_lines_skips_blank() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fs = 500 Hz\n\n   \n  FFT only  ").unwrap();

        let samples = read_lines(file.path()).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].text, "fs = 500 Hz");
        assert_eq!(samples[1].text, "FFT only");
        assert!(samples[1].source.ends_with(":4"));
    }

    #[test]
    fn test_builtin_samples_extract() {
        let extractor = MethodsExtractor::new();
        let confident = BUILTIN_SAMPLES
            .iter()
            .filter(|s| extractor.extract(s).confidence > 0.0)
            .count();

        assert_eq!(confident, BUILTIN_SAMPLES.len());
    }
}
