//! Snapshot rendering

use std::sync::atomic::{AtomicU64, Ordering};
use colored::Colorize;
use serde::Serialize;

use crate::notifications::{Subscriber, Toast, ToastState, ToastVariant};

/// Format used to print snapshots on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}. Valid options: text, json", s)),
        }
    }
}

#[derive(Serialize)]
struct SnapshotLine<'a> {
    sequence: u64,
    toasts: &'a [Toast],
}

/// Render surface printing every published state to stdout
#[derive(Debug)]
pub struct SnapshotPrinter {
    format: OutputFormat,
    sequence: AtomicU64,
}

impl SnapshotPrinter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            sequence: AtomicU64::new(0),
        }
    }

    /// Number of snapshots printed so far
    pub fn printed(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn render(&self, sequence: u64, state: &ToastState) -> String {
        match self.format {
            OutputFormat::Text => render_text(sequence, state),
            OutputFormat::Json => render_json(sequence, state),
        }
    }
}

impl Subscriber for SnapshotPrinter {
    fn handle_state(&self, state: &ToastState) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        println!("{}", self.render(sequence, state));
    }
}

fn render_text(sequence: u64, state: &ToastState) -> String {
    let plural = if state.len() == 1 { "" } else { "s" };
    let mut out = format!("#{} {} toast{}", sequence, state.len(), plural).bold().to_string();

    if state.is_empty() {
        out.push_str(&format!("\n  {}", "(none)".dimmed()));
    }
    for toast in state.iter() {
        out.push('\n');
        out.push_str(&render_toast_line(toast));
    }
    out
}

fn render_toast_line(toast: &Toast) -> String {
    let marker = if toast.open { "●".green() } else { "○".dimmed() };
    let status = if toast.open { "open" } else { "closed" };

    let title = toast.title.as_deref().unwrap_or("(untitled)");
    let title = match toast.variant {
        ToastVariant::Destructive => title.red().bold(),
        ToastVariant::Default => title.normal(),
    };

    let mut line = format!("  {} [{}] {} ({})", marker, toast.id, title, status);
    if let Some(description) = &toast.description {
        line.push_str(&format!(" - {}", description));
    }
    if let Some(action) = &toast.action {
        line.push_str(&format!(" [{}]", action.label.cyan()));
    }
    line
}

fn render_json(sequence: u64, state: &ToastState) -> String {
    let line = SnapshotLine {
        sequence,
        toasts: &state.toasts,
    };
    serde_json::to_string(&line)
        .unwrap_or_else(|e| format!(r#"{{"sequence":{},"error":"{}"}}"#, sequence, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{ToastContent, ToastId};

    fn sample_state() -> ToastState {
        let mut closed = Toast::new(
            ToastId::from(1),
            ToastContent::titled("Upload failed").with_variant(ToastVariant::Destructive),
        );
        closed.open = false;
        ToastState {
            toasts: vec![
                Toast::new(ToastId::from(2), ToastContent::titled("Uploaded").with_description("report.pdf")),
                closed,
            ],
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("Json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_rendering() {
        colored::control::set_override(false);
        let printer = SnapshotPrinter::new(OutputFormat::Text);
        let text = printer.render(3, &sample_state());

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#3 2 toasts");
        assert_eq!(lines[1], "  ● [2] Uploaded (open) - report.pdf");
        assert_eq!(lines[2], "  ○ [1] Upload failed (closed)");
    }

    #[test]
    fn test_text_rendering_empty_state() {
        colored::control::set_override(false);
        let printer = SnapshotPrinter::new(OutputFormat::Text);
        let text = printer.render(1, &ToastState::new());
        assert_eq!(text, "#1 0 toasts\n  (none)");
    }

    #[test]
    fn test_json_rendering() {
        let printer = SnapshotPrinter::new(OutputFormat::Json);
        let json = printer.render(5, &sample_state());

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sequence"], 5);
        assert_eq!(value["toasts"][0]["id"], "2");
        assert_eq!(value["toasts"][0]["open"], true);
        assert_eq!(value["toasts"][1]["variant"], "destructive");
        assert_eq!(value["toasts"][1]["open"], false);
    }

    #[test]
    fn test_printer_counts_snapshots() {
        let printer = SnapshotPrinter::new(OutputFormat::Json);
        printer.handle_state(&ToastState::new());
        printer.handle_state(&ToastState::new());
        assert_eq!(printer.printed(), 2);
    }
}
