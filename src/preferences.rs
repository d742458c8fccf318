use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

const FILENAME: &str = "session-memory.toml";

const DEFAULT_EXCLUDED_DIRS: &[&str] = &["memory", "backup", "logs"];

/// Size bounds applied while extracting and rendering. Fixed: the summary
/// layout and the minimum-content gate do not vary per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Earliest messages kept when the conversation is truncated.
    pub head: usize,
    /// Latest messages kept when the conversation is truncated.
    pub tail: usize,
    pub max_files: usize,
    /// Cap on each captured user message.
    pub max_message_chars: usize,
    /// Cap on each rendered conversation line, ellipsis included.
    pub max_line_chars: usize,
    /// Sessions with fewer user messages than this are not summarized.
    pub min_messages: usize,
}

impl Limits {
    pub const STANDARD: Limits = Limits {
        head: 3,
        tail: 5,
        max_files: 15,
        max_message_chars: 300,
        max_line_chars: 150,
        min_messages: 2,
    };
}

impl Default for Limits {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Optional settings stored in `~/.claude/session-memory.toml`.
///
/// Only the transcript search is configurable. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Parent directory names whose `.jsonl` files are never treated as
    /// session transcripts.
    pub excluded_dirs: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Preferences {
    /// Load preferences from `<dir>/session-memory.toml`.
    ///
    /// A missing file yields defaults. Unlike most config loaders this never
    /// writes a default file back: the summary is the only thing we write.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(FILENAME);
        match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("parsing {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
}
