//! Terminal output helpers, dual-mode: styled text for humans, structured JSON for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for structured data
//! - `indicatif` for spinners

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;
use webpilot_core::{SessionEvent, SessionStatus, ToolResult, ToolResultContent};

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    let msg = Msg {
        level,
        message,
        data,
    };
    let json = serde_json::to_string(&msg)
        .unwrap_or_else(|_| format!("{{\"level\":\"{level}\",\"message\":\"{message}\"}}"));
    println!("{json}");
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

pub fn error(text: &str) {
    if is_json() {
        let msg = Msg {
            level: "error",
            message: text,
            data: None,
        };
        let json = serde_json::to_string(&msg).unwrap_or_default();
        eprintln!("{json}");
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

/// Operator guidance printed under an error.
pub fn hint(text: &str) {
    if is_json() {
        let msg = Msg {
            level: "hint",
            message: text,
            data: None,
        };
        let json = serde_json::to_string(&msg).unwrap_or_default();
        eprintln!("{json}");
    } else {
        eprintln!("  {} {}", style("hint:").yellow(), text);
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

pub fn json_pretty(value: &JsonValue) {
    if is_json() {
        emit_json("data", "", Some(value));
    } else {
        let formatted = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        println!("{formatted}");
    }
}

/// Emit an arbitrary serializable value as structured output.
pub fn data<T: Serialize>(label: &str, value: &T) {
    if is_json() {
        let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
        emit_json("data", label, Some(&json_val));
    } else {
        let formatted =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{label}: <?>"));
        println!("{formatted}");
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

/// Raw text with no decoration; in JSON mode it is wrapped like any message.
pub fn text(label: &str, body: &str) {
    if is_json() {
        let data = serde_json::json!({ "text": body });
        emit_json("data", label, Some(&data));
    } else {
        println!("{body}");
    }
}

// ── Tables ─────────────────────────────────────────────────────────

/// Create a styled table for listing items.
pub fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Add a header row to the table.
pub fn table_header(table: &mut Table, col1: &str, col2: &str) {
    table.set_header(vec![
        Cell::new(col1)
            .fg(Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
        Cell::new(col2)
            .fg(Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
    ]);
}

/// Add a row to the table.
pub fn table_row(table: &mut Table, name: &str, desc: &str) {
    table.add_row(vec![Cell::new(name).fg(Color::Green), Cell::new(desc)]);
}

/// Print a table (JSON mode emits items array instead).
pub fn table_print(table: &Table, items: &[(&str, &str)]) {
    if is_json() {
        let items: Vec<_> = items
            .iter()
            .map(|(name, desc)| serde_json::json!({ "name": name, "description": desc }))
            .collect();
        let data = serde_json::json!({ "items": items });
        emit_json("list", "", Some(&data));
    } else {
        println!("{table}");
    }
}

// ── Spinners ───────────────────────────────────────────────────────

/// Create a spinner for async operations. Hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Finish spinner with success message.
pub fn spinner_success(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    success(message);
}

/// Finish spinner with error message.
pub fn spinner_error(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    error(message);
}

// ── Session events ─────────────────────────────────────────────────

const PREVIEW_CHARS: usize = 120;

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out.replace('\n', " ")
}

/// One-line summary of an effector result for the terminal.
fn result_summary(result: &ToolResult) -> String {
    let parts: Vec<String> = result
        .content
        .iter()
        .map(|c| match c {
            ToolResultContent::Text { text } => preview(text),
            ToolResultContent::Json { json } => preview(&json.to_string()),
            ToolResultContent::Image { .. } => "[image]".to_string(),
        })
        .collect();
    parts.join(" ")
}

/// Render one event from the running session.
///
/// Text deltas are written without a newline so streamed replies read as
/// prose; `TurnEnd` closes the line.
pub fn event(event: &SessionEvent) {
    if is_json() {
        match event {
            // Deltas are reassembled in the transcript; skip the noise.
            SessionEvent::TextDelta { .. } => {}
            other => data("event", other),
        }
        return;
    }

    match event {
        SessionEvent::TurnStart { .. } => {}
        SessionEvent::TextDelta { text } => {
            print!("{text}");
            let _ = std::io::stdout().flush();
        }
        SessionEvent::TurnEnd { .. } => println!(),
        SessionEvent::ToolStart { tool_use } => {
            println!(
                "{} {} {}",
                style("→").cyan(),
                style(&tool_use.name).bold(),
                style(preview(&tool_use.input.to_string())).dim()
            );
        }
        SessionEvent::ToolDone {
            result,
            duration_ms,
            ..
        } => {
            let mark = if result.is_error {
                style("✗").red()
            } else {
                style("✓").green()
            };
            println!(
                "  {} {} {}",
                mark,
                result_summary(result),
                style(format!("({}ms)", duration_ms)).dim()
            );
        }
        SessionEvent::Status { message } => dim(message),
        SessionEvent::Compacted {
            turns_before,
            turns_after,
        } => dim(&format!(
            "Summarized transcript: {} → {} turns",
            turns_before, turns_after
        )),
        SessionEvent::CompactionSkipped { reason } => {
            warning(&format!("Summary skipped: {}", reason))
        }
        SessionEvent::ArtifactRecorded { uri } => kv("artifact", uri),
        SessionEvent::ArtifactDownloaded { uri, path } => {
            success(&format!("Saved {} → {}", uri, path))
        }
        SessionEvent::Error { error: message } => error(message),
        SessionEvent::SessionEnd { status } => match status {
            SessionStatus::Completed => success("Session completed"),
            SessionStatus::Failed { error: message } => {
                error(&format!("Session failed: {}", message))
            }
            SessionStatus::Running => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preview_truncates_and_flattens() {
        let long = "a\n".repeat(100);
        let out = preview(&long);
        assert!(out.ends_with('…'));
        assert!(!out.contains('\n'));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_result_summary_marks_images() {
        let result = ToolResult::success(
            "t1",
            vec![
                ToolResultContent::json(json!({"ok": true})),
                ToolResultContent::Image {
                    image: webpilot_core::ImageData::jpeg(vec![0xff, 0xd8]),
                },
            ],
        );
        assert_eq!(result_summary(&result), "{\"ok\":true} [image]");
    }
}
