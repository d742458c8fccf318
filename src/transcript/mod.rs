use crate::activity::SessionActivity;
use crate::preferences::Limits;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// ===================================================================
// Top-level transcript record — one per JSONL line
// ===================================================================

/// A single line in a Claude Code `.jsonl` transcript file.
///
/// Only the `message` payload matters here; every other field (uuid,
/// timestamps, progress data, snapshots) is ignored by serde.
#[derive(Debug, Deserialize)]
pub struct TranscriptRecord {
    #[serde(default)]
    pub message: Option<Message>,
}

// ===================================================================
// Message
// ===================================================================

#[derive(Debug, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: MessageContent,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    #[default]
    #[serde(other)]
    Other,
}

/// `message.content` can be a plain string (typed user text) or an array of
/// content parts (assistant responses, tool results). Anything else lands in
/// `Other` and is treated as empty.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Other(serde_json::Value),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Other(serde_json::Value::Null)
    }
}

// ===================================================================
// Content parts inside message.content[]
// ===================================================================

/// A part is either a `type`-tagged block or something we can't classify
/// (a bare string, an object without `type`, a block with mistyped fields).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Block(ContentBlock),
    Unrecognized(serde_json::Value),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text(TextBlock),
    #[serde(rename = "tool_use")]
    ToolUse(ToolUseBlock),
    /// thinking, tool_result, image, ...
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ToolUseBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub input: serde_json::Value,
}

impl ToolUseBlock {
    /// A non-empty string input parameter, if present.
    pub fn str_input(&self, key: &str) -> Option<&str> {
        self.input
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }
}

impl MessageContent {
    /// Plain text of the content: the trimmed string, or every `text` part
    /// joined with a single space and then trimmed. Other shapes are empty.
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(t) => t.trim().to_string(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Block(ContentBlock::Text(t)) => Some(t.text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string(),
            MessageContent::Other(_) => String::new(),
        }
    }

    /// Iterate over the `tool_use` blocks of a part list.
    pub fn tool_uses(&self) -> impl Iterator<Item = &ToolUseBlock> {
        let parts: &[ContentPart] = match self {
            MessageContent::Parts(p) => p,
            _ => &[],
        };
        parts.iter().filter_map(|p| match p {
            ContentPart::Block(ContentBlock::ToolUse(tu)) => Some(tu),
            _ => None,
        })
    }
}

impl TranscriptRecord {
    /// Decode one JSONL line. `None` for blank lines.
    pub fn parse_line(line: &str) -> Option<serde_json::Result<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        Some(serde_json::from_str(line))
    }
}

// ===================================================================
// Streaming parse
// ===================================================================

/// Stream a transcript file once, front to back, folding every message into
/// a fresh `SessionActivity`. Undecodable lines are skipped; I/O errors
/// propagate.
pub fn read_activity(path: &Path, limits: &Limits) -> Result<SessionActivity> {
    let file = File::open(path)
        .with_context(|| format!("opening transcript {}", path.display()))?;
    fold_lines(BufReader::new(file), limits)
        .with_context(|| format!("reading transcript {}", path.display()))
}

/// Fold any line source into a `SessionActivity`. A line that is not valid
/// UTF-8 counts as undecodable, same as malformed JSON.
pub fn fold_lines<R: BufRead>(reader: R, limits: &Limits) -> Result<SessionActivity> {
    let mut activity = SessionActivity::default();
    for (i, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let Ok(line) = std::str::from_utf8(&raw) else {
            tracing::debug!(line = i + 1, "transcript line is not UTF-8, skipping");
            continue;
        };
        match TranscriptRecord::parse_line(line) {
            None => {}
            Some(Ok(TranscriptRecord { message: Some(msg) })) => activity.observe(&msg, limits),
            Some(Ok(_)) => {
                tracing::debug!(line = i + 1, "record has no message payload, skipping");
            }
            Some(Err(e)) => {
                tracing::debug!(line = i + 1, error = %e, "undecodable transcript line, skipping");
            }
        }
    }
    Ok(activity)
}
