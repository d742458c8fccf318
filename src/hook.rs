use serde::Deserialize;
use std::io::{self, IsTerminal, Read};

/// Upper bound on the stdin payload. Real payloads are a few hundred bytes.
const MAX_PAYLOAD_BYTES: u64 = 64 * 1024;

// ===================================================================
// Hook input (received via stdin, snake_case JSON)
// ===================================================================

/// Fields shared by every hook event payload. All optional: this binary is
/// wired to session-end style events but must not care which one.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

impl HookInput {
    /// Parse a hook payload. Empty or malformed input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        match serde_json::from_str(input) {
            Ok(hook) => Some(hook),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unparseable hook payload");
                None
            }
        }
    }
}

/// Read the hook payload from stdin, unless stdin is an interactive terminal
/// (a manual run would otherwise block waiting for input).
///
/// Reads until EOF, which the host sends after writing the payload.
pub fn read_stdin() -> Option<HookInput> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    read_from(stdin.lock())
}

/// Read at most `MAX_PAYLOAD_BYTES` from `reader` and parse it. Anything
/// larger is not a hook payload and is ignored.
fn read_from(reader: impl Read) -> Option<HookInput> {
    let mut buffer = String::new();
    if let Err(e) = reader
        .take(MAX_PAYLOAD_BYTES + 1)
        .read_to_string(&mut buffer)
    {
        tracing::debug!(error = %e, "failed to read hook payload from stdin");
        return None;
    }
    if buffer.len() as u64 > MAX_PAYLOAD_BYTES {
        tracing::debug!("hook payload too large, ignoring");
        return None;
    }
    HookInput::parse(&buffer)
}
