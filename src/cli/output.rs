//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, TriespellArgs};
use crate::error::Result;
use crate::spelling::WordCorrection;

/// Result structure for the `distance` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResult {
    pub a: String,
    pub b: String,
    pub distance: usize,
    pub ratio: f64,
}

/// Result structure for the `tokenize` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

/// Result structure for the `word` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordReport {
    pub words: Vec<WordCorrection>,
}

/// One corrected document of a batch.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchDocument {
    pub input: String,
    pub output: String,
    pub bytes: usize,
}

/// Result structure for the `batch` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResult {
    pub documents: Vec<BatchDocument>,
    pub threads: usize,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &TriespellArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result in the specified format to any writer.
pub fn write_result<W: Write, T: Serialize>(
    out: &mut W,
    message: &str,
    result: &T,
    args: &TriespellArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(out, message, result, args),
        OutputFormat::Json => output_json(out, result, args),
    }
}

/// Output in human-readable format.
fn output_human<W: Write, T: Serialize>(
    out: &mut W,
    message: &str,
    result: &T,
    args: &TriespellArgs,
) -> Result<()> {
    if args.verbosity() > 1 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;
    let type_name = std::any::type_name::<T>();

    if type_name.ends_with("TextCorrection") {
        output_text_correction_human(out, &value)
    } else if type_name.ends_with("WordReport") {
        output_word_report_human(out, &value)
    } else if type_name.ends_with("TokenList") {
        output_token_list_human(out, &value)
    } else if type_name.ends_with("BatchResult") {
        output_batch_result_human(out, &value)
    } else {
        output_generic_human(out, &value)
    }
}

/// Output a document correction report in human format.
fn output_text_correction_human<W: Write>(out: &mut W, value: &serde_json::Value) -> Result<()> {
    writeln!(out, "{}", field_str(value, "text"))?;
    writeln!(out)?;

    if let Some(corrections) = value.get("corrections").and_then(|c| c.as_array()) {
        for correction in corrections {
            let original = field_str(correction, "original");
            let corrected = field_str(correction, "corrected");
            if original == corrected {
                continue;
            }
            writeln!(
                out,
                "  [{}] {} -> {} (distance {})",
                format_value(&correction["position"]),
                original,
                corrected,
                format_value(&correction["distance"]),
            )?;
        }
    }

    writeln!(
        out,
        "Tokens: {}, unknown: {}, corrected: {}",
        format_value(&value["tokens"]),
        format_value(&value["unknown"]),
        format_value(&value["corrected"]),
    )?;
    Ok(())
}

/// Output per-word diagnostics in human format.
fn output_word_report_human<W: Write>(out: &mut W, value: &serde_json::Value) -> Result<()> {
    if let Some(words) = value.get("words").and_then(|w| w.as_array()) {
        for word in words {
            let original = field_str(word, "original");
            if word["known"].as_bool().unwrap_or(false) {
                writeln!(out, "{original}: known")?;
            } else if word["distance"].is_null() {
                writeln!(
                    out,
                    "{original}: no candidate ({} considered)",
                    format_value(&word["candidates_considered"])
                )?;
            } else {
                writeln!(
                    out,
                    "{original} -> {} (distance {}, {} candidates considered)",
                    field_str(word, "corrected"),
                    format_value(&word["distance"]),
                    format_value(&word["candidates_considered"]),
                )?;
            }
        }
    }
    Ok(())
}

/// Output a token list in human format.
fn output_token_list_human<W: Write>(out: &mut W, value: &serde_json::Value) -> Result<()> {
    if let Some(tokens) = value.get("tokens").and_then(|t| t.as_array()) {
        for token in tokens {
            writeln!(
                out,
                "{}\t{}..{}\t{}",
                format_value(&token["position"]),
                format_value(&token["start_offset"]),
                format_value(&token["end_offset"]),
                field_str(token, "text"),
            )?;
        }
    }
    Ok(())
}

/// Output batch results in human format.
fn output_batch_result_human<W: Write>(out: &mut W, value: &serde_json::Value) -> Result<()> {
    if let Some(documents) = value.get("documents").and_then(|d| d.as_array()) {
        for document in documents {
            writeln!(
                out,
                "{} -> {} ({})",
                field_str(document, "input"),
                field_str(document, "output"),
                format_bytes(document["bytes"].as_u64().unwrap_or(0)),
            )?;
        }
        writeln!(
            out,
            "Corrected {} documents on {} threads in {} ms",
            documents.len(),
            format_value(&value["threads"]),
            format_value(&value["duration_ms"]),
        )?;
    }
    Ok(())
}

/// Output in generic human format.
fn output_generic_human<W: Write>(out: &mut W, value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                writeln!(out, "{key}: {formatted_val}")?;
            }
        }
        _ => {
            let formatted_value = format_value(value);
            writeln!(out, "{formatted_value}")?;
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<W: Write, T: Serialize>(out: &mut W, result: &T, args: &TriespellArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

fn field_str<'a>(value: &'a serde_json::Value, key: &str) -> &'a str {
    value.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => {
            let formatted_values = obj
                .iter()
                .map(|(key, val)| format!("{key}={}", format_value(val)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{formatted_values}}}")
        }
        serde_json::Value::Null => "-".to_string(),
    }
}

/// Format bytes into human-readable format.
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}
