//! Parse command - extract a card from a single model response.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info};

use cardex_core::{BusinessCard, CardExtractor, CardParser, ExtractionResult};

use super::config::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file holding the model response (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Report the detected response format and warnings on stderr
    #[arg(long)]
    show_format: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
    /// XML output
    Xml,
}

impl OutputFormat {
    /// File extension used when writing batch outputs.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
            OutputFormat::Xml => "xml",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = read_input(args.input.as_deref())?;
    match &args.input {
        Some(path) => info!("Parsing response from {}", path.display()),
        None => info!("Parsing response from stdin"),
    }

    let parser = CardParser::from_config(config.extraction);
    let result = parser.parse(&text);

    if args.show_format {
        report(&result);
    }

    let output = format_card(&result.card, args.format, args.pretty)?;

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

    debug!("Extraction took {}ms", result.processing_time_ms);

    Ok(())
}

/// Read the response from a file, or stdin when no path is given.
pub fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            Ok(fs::read_to_string(path)?)
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn report(result: &ExtractionResult) {
    eprintln!("{} Detected format: {}", style("ℹ").blue(), result.format);
    eprintln!(
        "{} Fields: {}",
        style("ℹ").blue(),
        result
            .card
            .present_fields()
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
}

pub fn format_card(card: &BusinessCard, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(card)?),
        OutputFormat::Json => Ok(serde_json::to_string(card)?),
        OutputFormat::Csv => format_csv(card),
        OutputFormat::Text => Ok(format_text(card)),
        OutputFormat::Xml => Ok(quick_xml::se::to_string_with_root("card", card)?),
    }
}

fn format_csv(card: &BusinessCard) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "name",
        "surname",
        "titles",
        "organization",
        "phone",
        "emails",
        "address",
        "web_address",
        "fax",
        "additional_info",
    ])?;

    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    wtr.write_record([
        field(&card.name),
        field(&card.surname),
        field(&card.titles),
        field(&card.organization),
        field(&card.phone),
        card.emails_joined(),
        field(&card.address),
        field(&card.web_address),
        field(&card.fax),
        field(&card.additional_info),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(card: &BusinessCard) -> String {
    let mut output = String::new();

    let full_name = [card.titles.as_deref(), card.name.as_deref(), card.surname.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !full_name.is_empty() {
        output.push_str(&format!("{}\n", full_name));
    }
    if let Some(organization) = &card.organization {
        output.push_str(&format!("{}\n", organization));
    }
    output.push('\n');

    let lines = [
        ("Phone", card.phone.clone()),
        ("Fax", card.fax.clone()),
        ("Email", card.emails.as_ref().map(|_| card.emails_joined())),
        ("Web", card.web_address.clone()),
        ("Address", card.address.clone()),
    ];
    for (label, value) in lines {
        if let Some(value) = value {
            output.push_str(&format!("{:<8} {}\n", format!("{}:", label), value));
        }
    }

    if let Some(info) = &card.additional_info {
        output.push_str(&format!("\nNote: {}\n", info));
    }

    output
}
