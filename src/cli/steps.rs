//! Scenario step parsing
//!
//! A scenario is a list of textual steps, given on the command line or read
//! from script files (one step per line, `#` starts a comment).

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use anyhow::{Context, Result};

use crate::notifications::{ToastContent, ToastId, ToastUpdate, ToastVariant};

/// One scenario operation
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Raise a toast
    Notify(ToastContent),

    /// Change an open toast
    Update { id: ToastId, changes: ToastUpdate },

    /// Dismiss through the store
    Dismiss(ToastId),

    /// Close from the render surface, through the toast's open-change callback
    Close(ToastId),

    DismissAll,

    /// Let time pass so removal timers can fire
    Wait(Duration),
}

/// Split `TITLE|DESCRIPTION` into its parts; empty parts are omitted
fn split_text(text: &str) -> (Option<String>, Option<String>) {
    let (title, description) = match text.split_once('|') {
        Some((title, description)) => (title, Some(description)),
        None => (text, None),
    };
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    (non_empty(title), description.and_then(non_empty))
}

fn content_from(text: &str, variant: ToastVariant) -> ToastContent {
    let (title, description) = split_text(text);
    ToastContent {
        title,
        description,
        action: None,
        variant,
    }
}

fn parse_id(value: &str, step: &str) -> Result<ToastId> {
    let value = value.trim();
    if value.is_empty() {
        return Err(anyhow::anyhow!("Step '{}' needs a toast id", step));
    }
    Ok(ToastId::from(value))
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value)),
            None => (s, None),
        };

        match (name.to_lowercase().as_str(), value) {
            ("notify", Some(text)) => Ok(Step::Notify(content_from(text, ToastVariant::Default))),
            ("destructive", Some(text)) => {
                Ok(Step::Notify(content_from(text, ToastVariant::Destructive)))
            }
            ("update", Some(rest)) => {
                let (id, text) = rest.split_once('=').ok_or_else(|| {
                    anyhow::anyhow!("Step '{}' must look like update=ID=TITLE[|DESCRIPTION]", s)
                })?;
                let (title, description) = split_text(text);
                Ok(Step::Update {
                    id: parse_id(id, s)?,
                    changes: ToastUpdate {
                        title,
                        description,
                        ..ToastUpdate::default()
                    },
                })
            }
            ("dismiss", Some(id)) => Ok(Step::Dismiss(parse_id(id, s)?)),
            ("close", Some(id)) => Ok(Step::Close(parse_id(id, s)?)),
            ("dismiss-all", None) => Ok(Step::DismissAll),
            ("wait", Some(ms)) => {
                let ms = ms.trim().parse::<u64>()
                    .with_context(|| format!("Invalid wait duration in step '{}'", s))?;
                Ok(Step::Wait(Duration::from_millis(ms)))
            }
            _ => Err(anyhow::anyhow!(
                "Unknown step '{}'. Valid steps: notify=TITLE[|DESC], destructive=TITLE[|DESC], \
                 update=ID=TITLE[|DESC], dismiss=ID, close=ID, dismiss-all, wait=MS",
                s
            )),
        }
    }
}

/// Parse steps from script text, skipping blank lines and comments
pub fn parse_script(content: &str) -> Result<Vec<Step>> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then_some((index + 1, line))
        })
        .map(|(line_no, line)| {
            line.parse::<Step>()
                .with_context(|| format!("Line {}", line_no))
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    parse_script(&content)
        .with_context(|| format!("Invalid script: {}", path.display()))
}
