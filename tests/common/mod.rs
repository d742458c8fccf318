use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Run the hook binary with `home` as `$HOME`, an optional
/// `CLAUDE_TRANSCRIPT_PATH`, and `stdin` piped in.
pub fn run_cli(home: &Path, transcript_env: Option<&Path>, stdin: &str) -> (i32, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_session-memory"));
    cmd.env("HOME", home)
        .env_remove("CLAUDE_TRANSCRIPT_PATH")
        .env_remove("SESSION_MEMORY_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(path) = transcript_env {
        cmd.env("CLAUDE_TRANSCRIPT_PATH", path);
    }
    let mut child = cmd.spawn().expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Create a temp dir to act as `$HOME`, with `.claude/projects/` in place.
/// The `TempDir` must be kept alive for the duration of the test.
pub fn temp_home() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".claude/projects")).unwrap();
    dir
}

/// Write a transcript named `<uuid>.jsonl` under `~/.claude/projects/<project>/`.
pub fn write_transcript(home: &Path, project: &str, lines: &[String]) -> PathBuf {
    let dir = home.join(".claude/projects").join(project);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}.jsonl", uuid::Uuid::new_v4()));
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

pub fn summary_path(transcript: &Path) -> PathBuf {
    transcript.parent().unwrap().join("memory/last-session.md")
}

pub fn user(text: &str) -> String {
    format!(
        r#"{{"type":"user","uuid":"u","isSidechain":false,"userType":"external","cwd":"/tmp","sessionId":"s","timestamp":"t","version":"v","message":{{"role":"user","content":{}}}}}"#,
        serde_json::to_string(text).unwrap()
    )
}

pub fn tool_use(name: &str, file_path: &str) -> String {
    format!(
        r#"{{"type":"assistant","uuid":"a","isSidechain":false,"userType":"external","cwd":"/tmp","sessionId":"s","timestamp":"t","version":"v","message":{{"role":"assistant","content":[{{"type":"tool_use","id":"toolu_1","name":"{name}","input":{{"file_path":{}}}}}]}}}}"#,
        serde_json::to_string(file_path).unwrap()
    )
}

/// Hook payload as the host sends it on stdin.
pub fn hook_payload(transcript_path: &Path) -> String {
    format!(
        r#"{{
    "session_id": "test-session",
    "transcript_path": {},
    "cwd": "/tmp",
    "permission_mode": "default",
    "hook_event_name": "SessionEnd",
    "reason": "other"
}}"#,
        serde_json::to_string(&transcript_path.to_string_lossy()).unwrap()
    )
}
