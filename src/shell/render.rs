//! Text and JSON rendering of command results.

use crate::session::CommandOutput;
use crate::shell::help;
use crate::store::DirEntry;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

/// Output flavour of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render a successful command as human readable text.
/// Commands that only change state render as an empty string.
pub fn render_text(output: &CommandOutput, color: bool) -> String {
    match output {
        CommandOutput::Listing { entries } => render_listing(entries, color),
        CommandOutput::Content { content } => content.clone(),
        CommandOutput::Path { path } => path.clone(),
        CommandOutput::Help { topic } => help::render(topic.as_deref()),
        CommandOutput::Exit => "Exiting.".to_string(),
        CommandOutput::Created { .. }
        | CommandOutput::Removed { .. }
        | CommandOutput::Moved { .. }
        | CommandOutput::Done => String::new(),
    }
}

fn render_listing(entries: &[DirEntry], color: bool) -> String {
    entries
        .iter()
        .map(|entry| {
            if !entry.kind.is_directory() {
                format!("  {}", entry.name)
            } else if color {
                format!("  {}/", entry.name.blue().bold())
            } else {
                format!("  {}/", entry.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render an error line for the text shell
pub fn render_error_text(message: &str) -> String {
    format!("Error: {}", message)
}

/// Render a successful command as JSON
pub fn render_json(output: &CommandOutput) -> String {
    let value = match output {
        CommandOutput::Help { topic } => json!({
            "type": "help",
            "text": help::render(topic.as_deref()),
        }),
        other => to_value(other),
    };
    value.to_string()
}

/// Render a failure as JSON with a stable `kind`
pub fn render_error_json(kind: &str, message: &str) -> String {
    json!({
        "type": "error",
        "kind": kind,
        "message": message,
    })
    .to_string()
}

fn to_value<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| json!({ "type": "error", "kind": "render", "message": e.to_string() }))
}
