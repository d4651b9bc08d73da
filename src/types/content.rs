//! Content types for the Gemini API.

use serde::{Deserialize, Serialize};

/// A part of a content message.
///
/// Only text is sent. Responses may carry other part kinds (function calls,
/// inline data, executable code); those are kept verbatim as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Text content.
    Text {
        /// The text content.
        text: String,
        /// Set on reasoning summaries emitted by thinking models.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought: Option<bool>,
    },
    /// Any non-text part.
    Other(serde_json::Value),
}

impl Part {
    /// Creates a plain text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: text.into(),
            thought: None,
        }
    }

    /// Returns the text of an answer part; `None` for thoughts and non-text parts.
    pub fn answer_text(&self) -> Option<&str> {
        match self {
            Part::Text { text, thought } if *thought != Some(true) => Some(text),
            _ => None,
        }
    }
}

/// A content message with a role and parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// The role of the content author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts of the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-part user turn.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::User),
            parts: vec![Part::text(text)],
        }
    }
}

/// The role of a message author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User role.
    User,
    /// Model role.
    Model,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_text_serialization() {
        let content = Content::user_text("Hello");
        let value = serde_json::to_value(&content).unwrap();

        assert_eq!(value, json!({"role": "user", "parts": [{"text": "Hello"}]}));
    }

    #[test]
    fn test_non_text_part_kept_as_json() {
        let part: Part = serde_json::from_value(json!({
            "functionCall": {"name": "lookup", "args": {}}
        }))
        .unwrap();

        assert!(matches!(part, Part::Other(_)));
        assert_eq!(part.answer_text(), None);
    }

    #[test]
    fn test_thought_part_is_not_answer() {
        let part: Part = serde_json::from_value(json!({"text": "thinking...", "thought": true})).unwrap();
        assert_eq!(part.answer_text(), None);

        let part: Part = serde_json::from_value(json!({"text": "answer"})).unwrap();
        assert_eq!(part.answer_text(), Some("answer"));
    }
}
