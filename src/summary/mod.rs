use crate::activity::SessionActivity;
use crate::preferences::Limits;
use crate::window::head_tail;
use chrono::{DateTime, TimeZone};
use minijinja::{context, Environment};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// The report layout. Blocks are trimmed (`trim_blocks`/`lstrip_blocks`),
/// so every emitted line comes from a literal or `{{ }}` line below.
const SUMMARY_TEMPLATE: &str = "\
# Last Session Summary

- **Date**: {{ date }}
- **Session**: `{{ session }}...`
- **Messages**: {{ total }}

## Conversation
{% for line in conversation %}
{{ loop.index }}. {{ line }}
{% endfor %}
{% if files %}

## Files Changed
{% for file in files %}
- ({{ file.kind }}) `{{ file.path }}`
{% endfor %}
{% if hidden %}
- ... and {{ hidden }} more files
{% endif %}
{% endif %}
";

const SESSION_ID_CHARS: usize = 8;

// ===================================================================
// Input: everything the renderer needs, gathered by the orchestrator
// ===================================================================

pub struct SummaryInput<'a, Tz: TimeZone> {
    pub transcript_path: &'a Path,
    pub activity: &'a SessionActivity,
    pub generated_at: &'a DateTime<Tz>,
    pub limits: Limits,
}

// ===================================================================
// Error: only template rendering can fail in pure code
// ===================================================================

#[derive(Debug)]
pub enum SummaryError {
    TemplateSyntax(String),
    TemplateRender(String),
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryError::TemplateSyntax(msg) => write!(f, "template syntax error: {msg}"),
            SummaryError::TemplateRender(msg) => write!(f, "template render error: {msg}"),
        }
    }
}

impl std::error::Error for SummaryError {}

// ===================================================================
// Rendering (pure computation)
// ===================================================================

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileEntry {
    pub kind: &'static str,
    pub path: String,
}

/// Render the summary document. Deterministic for a given input; the only
/// time-dependent field is `generated_at`, which the caller supplies.
pub fn render<Tz>(input: &SummaryInput<'_, Tz>) -> Result<String, SummaryError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let activity = input.activity;
    let limits = input.limits;

    let window = head_tail(&activity.user_messages, limits.head, limits.tail);
    let conversation: Vec<String> = window
        .lines
        .iter()
        .map(|m| display_line(m, limits.max_line_chars))
        .collect();

    let all_files = file_entries(activity);
    let hidden = all_files.len().saturating_sub(limits.max_files);
    let files: Vec<&FileEntry> = all_files.iter().take(limits.max_files).collect();

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template("summary", SUMMARY_TEMPLATE)
        .map_err(|e| SummaryError::TemplateSyntax(format!("{e:#}")))?;
    let tmpl = env
        .get_template("summary")
        .map_err(|e| SummaryError::TemplateSyntax(format!("{e:#}")))?;
    tmpl.render(context! {
        date => input.generated_at.format("%Y-%m-%d %H:%M").to_string(),
        session => session_id(input.transcript_path),
        total => activity.message_count(),
        conversation,
        files,
        hidden,
    })
    .map_err(|e| SummaryError::TemplateRender(format!("{e:#}")))
}

/// First eight characters of the transcript's file stem.
pub fn session_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().chars().take(SESSION_ID_CHARS).collect())
        .unwrap_or_default()
}

/// Collapse line breaks and cap to `max` chars, the last three of which
/// become `...` when the message is cut.
fn display_line(msg: &str, max: usize) -> String {
    let clean = msg.replace('\n', " ");
    let clean = clean.trim();
    if clean.chars().count() > max {
        let kept: String = clean.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        clean.to_string()
    }
}

/// Edits first, then creations, each sorted by path.
fn file_entries(activity: &SessionActivity) -> Vec<FileEntry> {
    let mut edited: Vec<&String> = activity.files_edited.iter().collect();
    let mut created: Vec<&String> = activity.files_created.iter().collect();
    edited.sort();
    created.sort();
    edited
        .into_iter()
        .map(|p| FileEntry { kind: "edit", path: p.clone() })
        .chain(created.into_iter().map(|p| FileEntry { kind: "new", path: p.clone() }))
        .collect()
}
