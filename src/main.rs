//! jcore SOAP handler runner.
//!
//! Run with: `jcore-soap --config handlers.yaml --input request.xml`
//!
//! Loads a handler chain from configuration, runs one message through it and
//! prints the committed message on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use jcore_soap::parser::parse_soap_message;
use jcore_soap::{HandlerConfig, SoapMessage, SoapMessageContext};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Run a SOAP message through a configured handler chain.
///
/// Outbound messages get every configured header written into their SOAP
/// Header before being committed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML)
    #[arg(short, long, default_value = "handlers.yaml")]
    config: PathBuf,

    /// SOAP message to process; an empty envelope is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Treat the message as an inbound response instead of an outbound request
    #[arg(long)]
    inbound: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the message
    let log_level = args.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting jcore SOAP handler runner v{}", env!("CARGO_PKG_VERSION"));
    info!("Config file: {}", args.config.display());

    let config = if args.config.exists() {
        let content = tokio::fs::read_to_string(&args.config)
            .await
            .context("Failed to read config file")?;
        HandlerConfig::from_yaml(&content).context("Failed to parse config file")?
    } else {
        info!("Config file not found, using defaults");
        HandlerConfig::default()
    };

    info!(
        soap_version = ?config.settings.soap_version,
        headers = config.headers.len(),
        "Configuration loaded"
    );

    let mut message = match args.input {
        Some(ref path) => {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            parse_soap_message(&data).context("Failed to parse SOAP message")?
        }
        None => SoapMessage::new(config.settings.soap_version),
    };
    message.set_pretty_print(config.settings.pretty_print);

    let mut ctx = if args.inbound {
        SoapMessageContext::inbound(message)
    } else {
        SoapMessageContext::outbound(message)
    };

    let chain = config.build_chain();
    let proceed = chain
        .handle_message(&mut ctx)
        .context("Handler chain rejected the message")?;
    chain.close(&ctx);

    if !proceed {
        warn!("Handler chain stopped processing");
    }

    let output = match ctx.message().committed_xml() {
        Some(xml) => xml.to_string(),
        None => ctx.message().to_xml_string()?,
    };

    let mut stdout = tokio::io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    if !proceed {
        anyhow::bail!("Message processing stopped by a handler");
    }
    Ok(())
}
