use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Environment variable the host sets to the current session's transcript.
pub const TRANSCRIPT_ENV: &str = "CLAUDE_TRANSCRIPT_PATH";

const TRANSCRIPT_EXT: &str = "jsonl";

/// Resolves which transcript to summarize.
///
/// Explicit paths win when they name an existing file; otherwise the newest
/// `.jsonl` under `search_root` is used.
#[derive(Debug, Default)]
pub struct Locator {
    /// Candidate paths checked in order before any search.
    pub overrides: Vec<PathBuf>,
    /// Usually `~/.claude/projects`.
    pub search_root: Option<PathBuf>,
    /// Parent directory names holding generated artifacts, not sessions.
    pub excluded_dirs: Vec<String>,
}

impl Locator {
    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(path) = self.overrides.iter().find(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "using explicit transcript path");
            return Some(path.clone());
        }
        let root = self.search_root.as_deref()?;
        self.newest_transcript(root)
    }

    /// Newest `.jsonl` file under `root` by mtime. On equal mtimes the
    /// lexicographically smallest path wins so repeated runs agree.
    /// Symlinked transcripts count, with their target's mtime; symlinked
    /// directories are not descended into.
    fn newest_transcript(&self, root: &Path) -> Option<PathBuf> {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "search root does not exist");
            return None;
        }

        let mut best: Option<(SystemTime, PathBuf)> = None;
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !self.is_candidate(path) {
                continue;
            }
            // Follows symlinks; dangling links fail here and are skipped.
            let Ok(meta) = fs::metadata(path) else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let Ok(modified) = meta.modified() else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((t, p)) => modified > *t || (modified == *t && path < p.as_path()),
            };
            if better {
                best = Some((modified, entry.into_path()));
            }
        }

        best.map(|(_, p)| p)
    }

    fn is_candidate(&self, path: &Path) -> bool {
        if path.extension().is_none_or(|ext| ext != TRANSCRIPT_EXT) {
            return false;
        }
        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());
        !parent.is_some_and(|name| self.excluded_dirs.iter().any(|d| d == name))
    }
}
