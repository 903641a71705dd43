//! Ask command - send card text to the model provider and parse its answer.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardex_core::provider::{build_request, extract_text_response, RawResponse};
use cardex_core::{CardExtractor, CardParser, ProviderKind};

use super::config::load_config;
use super::parse::{format_card, OutputFormat};

/// Arguments for the ask command.
#[derive(Args)]
pub struct AskArgs {
    /// Card text to send
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    message: Option<String>,

    /// Read the card text from a file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Override the configured provider
    #[arg(short, long, value_enum)]
    provider: Option<ProviderArg>,

    /// Print the unparsed model text as a {"rawText": ...} envelope
    #[arg(long)]
    raw: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProviderArg {
    /// Workspace chat endpoint
    Anythingllm,
    /// Local generate endpoint
    Ollama,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Anythingllm => ProviderKind::AnythingLlm,
            ProviderArg::Ollama => ProviderKind::Ollama,
        }
    }
}

pub async fn run(args: AskArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let mut provider = config.provider.clone();
    if let Some(kind) = args.provider {
        provider.kind = kind.into();
    }

    let message = match (&args.message, &args.file) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => anyhow::bail!("Provide card text or --file"),
    };

    let request = build_request(&provider, &message)?;
    info!("Sending {} characters to {} ({})", message.len(), request.url, provider.kind);

    let client = reqwest::Client::builder()
        .user_agent("cardex-cli/0.1.0")
        .timeout(Duration::from_secs(provider.timeout_secs))
        .build()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Waiting for model...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut builder = client.post(&request.url).json(&request.body);
    if let Some(key) = &request.api_key {
        builder = builder.bearer_auth(key);
    }

    let response = builder.send().await;
    spinner.finish_and_clear();
    let response = response?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        anyhow::bail!("API error: {} - {}", status, body);
    }
    debug!("Provider answered with {} bytes", body.len());

    let text = extract_text_response(provider.kind, &body)?;

    let output = if args.raw {
        serde_json::to_string(&RawResponse { raw_text: text })?
    } else {
        let result = CardParser::from_config(config.extraction).parse(&text);
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
        format_card(&result.card, args.format, false)?
    };

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

    Ok(())
}
