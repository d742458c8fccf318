/// Display list produced by head/tail truncation.
#[derive(Debug, PartialEq, Eq)]
pub struct Window {
    pub lines: Vec<String>,
    /// Whether a skip marker replaced the middle of the sequence.
    pub truncated: bool,
}

/// Keep the first `head` and last `tail` messages, collapsing everything in
/// between into a single `... (N messages skipped) ...` marker.
///
/// Sequences no longer than `head + tail` come back unchanged, so the two
/// windows can never overlap.
pub fn head_tail(messages: &[String], head: usize, tail: usize) -> Window {
    let total = messages.len();
    if total <= head + tail {
        return Window {
            lines: messages.to_vec(),
            truncated: false,
        };
    }
    let skipped = total - head - tail;
    let mut lines = Vec::with_capacity(head + tail + 1);
    lines.extend_from_slice(&messages[..head]);
    lines.push(format!("... ({skipped} messages skipped) ..."));
    lines.extend_from_slice(&messages[total - tail..]);
    Window {
        lines,
        truncated: true,
    }
}
