use strucbot_api::SchemaRecord;
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str =
    "Welcome! I can help you create database schemas. Try asking: \"Create a table for users\".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub enum MessageBody {
    Text(String),
    Schema(SchemaRecord),
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub body: MessageBody,
}

/// Ordered conversation log behind the chat view. Schema cards carry their
/// record's id so a delete action can remove the matching message.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// A new session opens with the fixed welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: Uuid::new_v4(),
                sender: Sender::Bot,
                body: MessageBody::Text(WELCOME_MESSAGE.to_string()),
            }],
        }
    }

    /// Replaces everything after the welcome message with the caller's
    /// existing records, rendered as schema cards. Called once at mount.
    pub fn hydrate(&mut self, records: impl IntoIterator<Item = SchemaRecord>) {
        self.messages.truncate(1);
        for record in records {
            self.messages.push(schema_message(record));
        }
    }

    /// Appends the user's outgoing prompt.
    pub fn push_prompt(&mut self, prompt: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.messages.push(ChatMessage {
            id,
            sender: Sender::User,
            body: MessageBody::Text(prompt.into()),
        });
        id
    }

    /// Appends a freshly generated schema card.
    pub fn push_schema(&mut self, record: SchemaRecord) {
        self.messages.push(schema_message(record));
    }

    /// Appends the inline failure reply shown when a generate call errors.
    pub fn push_error(&mut self, detail: &str) {
        self.messages.push(ChatMessage {
            id: Uuid::new_v4(),
            sender: Sender::Bot,
            body: MessageBody::Text(format!("Sorry, an error occurred: {detail}")),
        });
    }

    /// Removes the schema card for a deleted record. Returns whether a
    /// message was removed.
    pub fn remove_schema(&mut self, schema_id: Uuid) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != schema_id);
        self.messages.len() != before
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

fn schema_message(record: SchemaRecord) -> ChatMessage {
    ChatMessage {
        id: record.id,
        sender: Sender::Bot,
        body: MessageBody::Schema(record),
    }
}
