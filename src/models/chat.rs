use serde::{ Serialize, Deserialize };

/// Body sent with create and update requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply returned by create and update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub chat_id: String,
    pub message: String,
}

/// Reply returned by list: the ids of every stored chat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatList {
    pub chats: Vec<String>,
}

/// Reply returned when fetching a single chat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatHistory {
    pub chat_id: String,
    pub messages: Vec<String>,
}

/// Ordered, append-only sequence of message texts backing the conversation
/// view. Lives in memory only; dropped with the view.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end. No deduplication, no size cap.
    pub fn append(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.append("hello");
        conversation.append("world");
        conversation.append("hello");

        assert_eq!(conversation.messages(), ["hello", "world", "hello"]);
        assert_eq!(conversation.len(), 3);
    }

    #[test]
    fn starts_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert!(conversation.messages().is_empty());
    }
}
