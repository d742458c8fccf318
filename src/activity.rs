use crate::preferences::Limits;
use crate::transcript::{Message, MessageContent, Role};
use std::collections::HashSet;

/// Everything the summary needs from one pass over a transcript.
#[derive(Debug, Default)]
pub struct SessionActivity {
    /// Typed user prompts in transcript order, each capped at capture time.
    pub user_messages: Vec<String>,
    pub files_edited: HashSet<String>,
    pub files_created: HashSet<String>,
}

impl SessionActivity {
    /// Fold one message into the accumulated state.
    pub fn observe(&mut self, msg: &Message, limits: &Limits) {
        match msg.role {
            Role::User => self.observe_user(&msg.content, limits),
            Role::Assistant => self.observe_tools(&msg.content),
            Role::Other => {}
        }
    }

    fn observe_user(&mut self, content: &MessageContent, limits: &Limits) {
        let text = content.text();
        // `<` marks host-injected pseudo-messages (command output, reminders).
        if text.is_empty() || text.starts_with('<') {
            return;
        }
        self.user_messages
            .push(text.chars().take(limits.max_message_chars).collect());
    }

    fn observe_tools(&mut self, content: &MessageContent) {
        for tu in content.tool_uses() {
            let set = match tu.name.as_str() {
                "Write" => &mut self.files_created,
                "Edit" => &mut self.files_edited,
                _ => continue,
            };
            if let Some(path) = tu.str_input("file_path") {
                set.insert(path.to_string());
            }
        }
    }

    pub fn message_count(&self) -> usize {
        self.user_messages.len()
    }
}
