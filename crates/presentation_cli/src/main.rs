//! MailTriage CLI
//!
//! Command-line interface for triaging emails against a running server.

#![allow(clippy::print_stdout)]

mod batch;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// MailTriage CLI
#[derive(Parser)]
#[command(name = "mailtriage-cli")]
#[command(author, version, about = "MailTriage email assistant CLI", long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(
        long,
        global = true,
        env = "MAILTRIAGE_SERVER_URL",
        default_value = "http://localhost:8080"
    )]
    server_url: String,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server readiness and dependency health
    Status,

    /// Triage a single email and print the drafted reply
    Triage {
        /// Email subject line
        #[arg(short, long, default_value = "")]
        subject: String,

        /// Email body text
        #[arg(short, long, default_value = "")]
        body: String,

        /// Sender, e.g. "Ada Lovelace <ada@example.com>"
        #[arg(long)]
        sender: Option<String>,

        /// Reply tone: friendly, neutral, or formal
        #[arg(short, long)]
        tone: Option<String>,
    },

    /// Triage a CSV of emails and write the results to another CSV
    Batch {
        /// Input CSV with subject and body columns (sender optional)
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Reply tone applied to every drafted reply
        #[arg(short, long)]
        tone: Option<String>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => status(&client, &cli.server_url).await,

        Commands::Triage {
            subject,
            body,
            sender,
            tone,
        } => {
            triage(
                &client,
                &cli.server_url,
                &subject,
                &body,
                sender.as_deref(),
                tone.as_deref(),
            )
            .await
        },

        Commands::Batch {
            input,
            output,
            tone,
        } => batch::run(&client, &cli.server_url, &input, &output, tone.as_deref()).await,
    }
}

async fn status(client: &reqwest::Client, base_url: &str) -> anyhow::Result<()> {
    let response = client
        .get(endpoint_url(base_url, "/ready"))
        .send()
        .await
        .context("failed to reach the server")?;

    let status = response.status();
    let report = response
        .json::<serde_json::Value>()
        .await
        .context("server returned a malformed readiness report")?;

    let ready = report
        .get("ready")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    println!("📊 Server Status:");
    println!(
        "   Ready:      {}",
        if ready { "✅ yes" } else { "❌ no" }
    );

    if let Some(classifier) = report.get("classifier") {
        let name = classifier
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        let healthy = classifier
            .get("healthy")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        println!(
            "   Classifier: {name} ({})",
            if healthy { "healthy" } else { "unavailable" }
        );
    }

    if let Some(generation) = report.get("generation") {
        let enabled = generation
            .get("enabled")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        if enabled {
            let healthy = generation
                .get("healthy")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            let model = generation
                .get("model")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            println!(
                "   Generation: {model} ({})",
                if healthy { "healthy" } else { "degraded" }
            );
        } else {
            println!("   Generation: disabled (template replies only)");
        }
    }

    if !ready || !status.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

async fn triage(
    client: &reqwest::Client,
    base_url: &str,
    subject: &str,
    body: &str,
    sender: Option<&str>,
    tone: Option<&str>,
) -> anyhow::Result<()> {
    let mut payload = serde_json::json!({
        "subject": subject,
        "body": body,
    });
    if let Some(sender) = sender {
        payload["sender"] = serde_json::Value::from(sender);
    }
    if let Some(tone) = tone {
        payload["tone"] = serde_json::Value::from(tone);
    }

    let response = client
        .post(endpoint_url(base_url, "/v1/triage"))
        .json(&payload)
        .send()
        .await
        .context("failed to reach the server")?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| format!("HTTP {status}"));
        anyhow::bail!("triage failed: {detail}");
    }

    let result = response
        .json::<serde_json::Value>()
        .await
        .context("server returned a malformed triage result")?;

    let badge = result.get("badge").and_then(|v| v.as_str()).unwrap_or("");
    let urgency = result
        .get("urgency")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    println!("{badge} Urgency: {urgency}");

    if let Some(scores) = result.get("scores") {
        let pick = |key: &str| scores.get(key).and_then(serde_json::Value::as_f64);
        if let (Some(urgent), Some(normal), Some(low)) =
            (pick("urgent"), pick("normal"), pick("low"))
        {
            println!("   Scores: urgent {urgent:.2} / normal {normal:.2} / low {low:.2}");
        }
    }

    if let Some(intent) = result.get("intent").and_then(|v| v.as_str()) {
        println!("   Intent: {intent}");
    }

    if let Some(reply) = result.get("reply") {
        let source = reply.get("source").and_then(|v| v.as_str()).unwrap_or("");
        let subject = reply.get("subject").and_then(|v| v.as_str()).unwrap_or("");
        println!("\n✉️  Suggested reply ({source}):");
        println!("   Subject: {subject}");
        if let Some(text) = reply.get("body").and_then(|v| v.as_str()) {
            println!();
            for line in text.lines() {
                println!("   {line}");
            }
        }
    }

    Ok(())
}
