// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    /// Returns the payload when it is present and truthy.
    ///
    /// `null`, `false`, `0` and the empty string are rejected. Objects and
    /// arrays are always accepted, empty or not.
    pub fn payload(&self) -> Option<&Value> {
        self.message.as_ref().filter(|v| is_truthy(v))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusBody {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged entry of the message list sent upstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ChatRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn falsy_messages_are_rejected() {
        for body in [
            json!({}),
            json!({ "message": null }),
            json!({ "message": "" }),
            json!({ "message": false }),
            json!({ "message": 0 }),
        ] {
            assert!(request(body.clone()).payload().is_none(), "{body}");
        }
    }

    #[test]
    fn structured_messages_are_accepted() {
        assert!(request(json!({ "message": "Hello" })).payload().is_some());
        assert!(request(json!({ "message": "   " })).payload().is_some());
        assert!(request(json!({ "message": { "round": 1 } })).payload().is_some());
        assert!(request(json!({ "message": {} })).payload().is_some());
        assert!(request(json!({ "message": [] })).payload().is_some());
        assert!(request(json!({ "message": 7 })).payload().is_some());
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = serde_json::to_value(ChatMessage::system("rules")).unwrap();
        assert_eq!(msg, json!({ "role": "system", "content": "rules" }));
    }
}
