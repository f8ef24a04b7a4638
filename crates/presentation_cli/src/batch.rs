//! CSV batch triage
//!
//! Reads a CSV of emails, sends them to the server in chunks, and writes
//! every input column back out followed by the triage columns.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Server-side limit on messages per batch request.
const CHUNK_SIZE: usize = 100;

/// Columns appended after the input columns, in output order.
const OUTPUT_COLUMNS: [&str; 9] = [
    "urgency",
    "score_urgent",
    "score_normal",
    "score_low",
    "intent_summary",
    "reply_subject",
    "reply_draft",
    "reply_source",
    "error",
];

#[derive(Serialize)]
struct BatchRequest<'a> {
    messages: &'a [BatchMessage<'a>],
    #[serde(skip_serializing_if = "Option::is_none")]
    tone: Option<&'a str>,
}

#[derive(Serialize)]
struct BatchMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<&'a str>,
    subject: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct BatchResponse {
    results: Vec<RowOutcome>,
}

#[derive(Deserialize)]
struct RowOutcome {
    #[serde(default)]
    ok: Option<TriageOutcome>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct TriageOutcome {
    urgency: String,
    scores: Scores,
    intent: String,
    reply: Reply,
}

#[derive(Deserialize)]
struct Scores {
    urgent: f64,
    normal: f64,
    low: f64,
}

#[derive(Deserialize)]
struct Reply {
    subject: String,
    body: String,
    source: String,
}

/// Positions of the recognized input columns.
struct ColumnMap {
    sender: Option<usize>,
    subject: Option<usize>,
    body: Option<usize>,
}

/// Locate sender/subject/body columns by case-insensitive header match.
fn map_columns(headers: &csv::StringRecord) -> anyhow::Result<ColumnMap> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let map = ColumnMap {
        sender: find("sender"),
        subject: find("subject"),
        body: find("body"),
    };

    if map.subject.is_none() && map.body.is_none() {
        anyhow::bail!("input CSV has neither a 'subject' nor a 'body' column");
    }

    Ok(map)
}

fn field<'a>(record: &'a csv::StringRecord, index: Option<usize>) -> &'a str {
    index.and_then(|i| record.get(i)).unwrap_or("")
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(value) }
}

pub async fn run(
    client: &reqwest::Client,
    base_url: &str,
    input: &Path,
    output: &Path,
    tone: Option<&str>,
) -> anyhow::Result<()> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("failed to open input CSV {}", input.display()))?;

    let headers = reader
        .headers()
        .context("failed to read CSV headers")?
        .clone();
    let columns = map_columns(&headers)?;

    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .context("failed to read input CSV rows")?;

    if rows.is_empty() {
        anyhow::bail!("input CSV {} contains no data rows", input.display());
    }

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("failed to create output CSV {}", output.display()))?;

    let mut output_headers = headers.clone();
    for column in OUTPUT_COLUMNS {
        output_headers.push_field(column);
    }
    writer
        .write_record(&output_headers)
        .context("failed to write output CSV headers")?;

    println!("📬 Triaging {} email(s) from {}...", rows.len(), input.display());

    let url = crate::endpoint_url(base_url, "/v1/triage/batch");
    let mut completed = 0usize;
    let mut failed = 0usize;

    for chunk in rows.chunks(CHUNK_SIZE) {
        let messages: Vec<BatchMessage<'_>> = chunk
            .iter()
            .map(|record| BatchMessage {
                sender: non_empty(field(record, columns.sender)),
                subject: field(record, columns.subject),
                body: field(record, columns.body),
            })
            .collect();

        let response = client
            .post(&url)
            .json(&BatchRequest {
                messages: &messages,
                tone,
            })
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
            anyhow::bail!("batch request rejected: {detail}");
        }

        let batch: BatchResponse = response
            .json()
            .await
            .context("server returned a malformed batch result")?;

        if batch.results.len() != chunk.len() {
            anyhow::bail!(
                "server returned {} result(s) for {} message(s)",
                batch.results.len(),
                chunk.len()
            );
        }

        for (record, outcome) in chunk.iter().zip(batch.results) {
            let mut row = record.clone();
            match outcome.ok {
                Some(result) => {
                    row.push_field(&result.urgency);
                    row.push_field(&format!("{:.4}", result.scores.urgent));
                    row.push_field(&format!("{:.4}", result.scores.normal));
                    row.push_field(&format!("{:.4}", result.scores.low));
                    row.push_field(&result.intent);
                    row.push_field(&result.reply.subject);
                    row.push_field(&result.reply.body);
                    row.push_field(&result.reply.source);
                    row.push_field("");
                    completed += 1;
                },
                None => {
                    for _ in 0..OUTPUT_COLUMNS.len() - 1 {
                        row.push_field("");
                    }
                    row.push_field(outcome.error.as_deref().unwrap_or("unknown error"));
                    failed += 1;
                },
            }
            writer
                .write_record(&row)
                .context("failed to write output CSV row")?;
        }
    }

    writer.flush().context("failed to flush output CSV")?;

    println!(
        "✅ Triage complete: {completed} drafted, {failed} failed → {}",
        output.display()
    );

    if failed > 0 {
        println!("⚠️  Failed rows carry the reason in the 'error' column");
    }

    Ok(())
}
