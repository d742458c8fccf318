use crate::hook::HookInput;
use crate::locator::Locator;
use crate::preferences::{Limits, Preferences};
use crate::summary::{self, SummaryInput};
use crate::transcript;
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const MEMORY_DIR: &str = "memory";
const SUMMARY_FILE: &str = "last-session.md";

/// What a run did. Errors are reported separately through `Result`.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Summary written to this path.
    Written(PathBuf),
    /// No transcript could be found; nothing to summarize.
    NoTranscript,
    /// Too few user messages to be worth a summary; the existing file (if
    /// any) is left untouched.
    TooFewMessages(usize),
}

/// One summarization run: where to look for the transcript.
pub struct Session {
    /// `~/.claude`: holds `projects/` and the optional preferences file.
    claude_dir: PathBuf,
    /// Explicit transcript candidates, most authoritative first.
    overrides: Vec<PathBuf>,
    pub prefs: Preferences,
}

impl Session {
    /// Load preferences from `claude_dir` and collect explicit transcript
    /// paths: the environment override, then the hook payload's
    /// `transcript_path`.
    pub fn open(
        claude_dir: PathBuf,
        env_override: Option<PathBuf>,
        hook: Option<&HookInput>,
    ) -> Result<Self> {
        let prefs = Preferences::load(&claude_dir)?;
        let overrides = env_override
            .into_iter()
            .chain(
                hook.and_then(|h| h.transcript_path.as_deref())
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from),
            )
            .collect();
        Ok(Self {
            claude_dir,
            overrides,
            prefs,
        })
    }

    fn locator(&self) -> Locator {
        Locator {
            overrides: self.overrides.clone(),
            search_root: Some(self.claude_dir.join("projects")),
            excluded_dirs: self.prefs.excluded_dirs.clone(),
        }
    }

    /// Locate, parse, gate, render, write.
    pub fn run<Tz>(&self, now: &DateTime<Tz>) -> Result<Outcome>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let Some(path) = self.locator().locate() else {
            return Ok(Outcome::NoTranscript);
        };
        tracing::debug!(transcript = %path.display(), "summarizing");

        let limits = Limits::STANDARD;
        let activity = transcript::read_activity(&path, &limits)?;
        let count = activity.message_count();
        if count < limits.min_messages {
            tracing::debug!(count, "too few user messages, leaving summary untouched");
            return Ok(Outcome::TooFewMessages(count));
        }

        let doc = summary::render(&SummaryInput {
            transcript_path: &path,
            activity: &activity,
            generated_at: now,
            limits,
        })
        .context("rendering session summary")?;

        let project_dir = path
            .parent()
            .with_context(|| format!("transcript {} has no parent directory", path.display()))?;
        let out = write_summary(project_dir, &doc)?;
        tracing::info!(summary = %out.display(), messages = count, "wrote session summary");
        Ok(Outcome::Written(out))
    }
}

/// Replace `<project_dir>/memory/last-session.md` with `doc`.
///
/// Written to a sibling temp file and renamed into place so readers see
/// either the old summary or the new one.
fn write_summary(project_dir: &Path, doc: &str) -> Result<PathBuf> {
    let dir = project_dir.join(MEMORY_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let out = dir.join(SUMMARY_FILE);
    let tmp = dir.join(format!(".{SUMMARY_FILE}.{}.tmp", std::process::id()));
    fs::write(&tmp, doc).with_context(|| format!("writing {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, &out) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("replacing {}", out.display()));
    }
    Ok(out)
}
