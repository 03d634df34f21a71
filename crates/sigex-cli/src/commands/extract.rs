//! Extract command - extract parameters from a single Methods text.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use sigex_core::{EnrichmentMode, ExtractionRecord, FilterHint, MethodsExtractor, ParameterExtractor};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file, or `-` to read stdin
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write the JSON record next to the input file
    #[arg(long)]
    sidecar: bool,

    /// Run the rule-based detectors only
    #[arg(long)]
    no_enrichment: bool,

    /// Show the extraction confidence score
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_enrichment {
        config.extraction.enrichment = EnrichmentMode::None;
    }

    if args.sidecar && args.input == "-" {
        anyhow::bail!("--sidecar needs an input file, not stdin");
    }

    let text = read_input(&args.input)?;
    info!("Extracting from {} ({} bytes)", args.input, text.len());

    let extractor = MethodsExtractor::from_config(&config.extraction);
    debug!("Using {:?}", extractor);

    let record = extractor.extract(&text);

    if args.sidecar {
        let sidecar_path = PathBuf::from(format!("{}{}", args.input, config.output.sidecar_suffix));
        fs::write(&sidecar_path, to_json(&record, true)?)?;
        println!(
            "{} Extraction written to {}",
            style("✓").green(),
            sidecar_path.display()
        );
    }

    let output = format_record(&record, args.format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else if !args.sidecar {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            record.confidence * 100.0
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(fs::read_to_string(path)?)
}

pub fn to_json(record: &ExtractionRecord, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(record)?)
    } else {
        Ok(serde_json::to_string(record)?)
    }
}

fn format_record(record: &ExtractionRecord, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(record, pretty),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn joined_methods(record: &ExtractionRecord) -> String {
    record
        .methods
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(";")
}

fn format_csv(record: &ExtractionRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "methods",
        "fs",
        "data_path",
        "bandpass_low",
        "bandpass_high",
        "nperseg",
        "window",
        "nfft",
        "lowpass",
        "highpass",
        "design_hint",
        "confidence",
    ])?;

    wtr.write_record([
        joined_methods(record),
        optional(record.fs),
        record.data_path.clone().unwrap_or_default(),
        optional(record.bandpass.map(|b| b.low_hz)),
        optional(record.bandpass.map(|b| b.high_hz)),
        optional(record.params.nperseg),
        record.params.window.clone().unwrap_or_default(),
        optional(record.params.nfft),
        optional(record.lowpass_cutoff()),
        optional(record.highpass_cutoff()),
        optional(record.design_hint()),
        format!("{:.3}", record.confidence),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractionRecord) -> String {
    let mut output = String::new();

    if record.methods.is_empty() {
        output.push_str("Methods: -\n");
    } else {
        output.push_str(&format!("Methods: {}\n", joined_methods(record).replace(';', ", ")));
    }

    if let Some(fs) = record.fs {
        output.push_str(&format!("Sampling rate: {} Hz\n", fs));
    }
    if let Some(bandpass) = record.bandpass {
        output.push_str(&format!("Bandpass: {}-{} Hz\n", bandpass.low_hz, bandpass.high_hz));
    }
    if let Some(path) = &record.data_path {
        output.push_str(&format!("Data path: {}\n", path));
    }

    if !record.params.is_empty() {
        output.push_str("Parameters:\n");
        if let Some(nperseg) = record.params.nperseg {
            output.push_str(&format!("  nperseg: {}\n", nperseg));
        }
        if let Some(window) = &record.params.window {
            output.push_str(&format!("  window:  {}\n", window));
        }
        if let Some(nfft) = record.params.nfft {
            output.push_str(&format!("  nfft:    {}\n", nfft));
        }
    }

    if !record.filters.is_empty() {
        output.push_str("Filters:\n");
        for filter in &record.filters {
            match filter {
                FilterHint::Lowpass { cutoff } => output.push_str(&format!("  lowpass {} Hz\n", cutoff)),
                FilterHint::Highpass { cutoff } => output.push_str(&format!("  highpass {} Hz\n", cutoff)),
                FilterHint::DesignHint { value } => output.push_str(&format!("  design: {}\n", value)),
            }
        }
    }

    output.push_str(&format!("Confidence: {:.3}\n", record.confidence));

    output
}
