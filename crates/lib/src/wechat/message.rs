//! Wire types for the message push endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message type tag (`MsgType` on the wire). Matched exactly and case-sensitively;
/// anything unrecognized is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MsgType {
    Text,
    Image,
    Voice,
    Video,
    Location,
    Link,
    Other(String),
}

impl MsgType {
    pub fn as_str(&self) -> &str {
        match self {
            MsgType::Text => "text",
            MsgType::Image => "image",
            MsgType::Voice => "voice",
            MsgType::Video => "video",
            MsgType::Location => "location",
            MsgType::Link => "link",
            MsgType::Other(raw) => raw.as_str(),
        }
    }
}

impl Default for MsgType {
    fn default() -> Self {
        MsgType::Other(String::new())
    }
}

impl From<&str> for MsgType {
    fn from(s: &str) -> Self {
        match s {
            "text" => MsgType::Text,
            "image" => MsgType::Image,
            "voice" => MsgType::Voice,
            "video" => MsgType::Video,
            "location" => MsgType::Location,
            "link" => MsgType::Link,
            other => MsgType::Other(other.to_string()),
        }
    }
}

impl From<String> for MsgType {
    fn from(s: String) -> Self {
        match MsgType::from(s.as_str()) {
            MsgType::Other(_) => MsgType::Other(s),
            known => known,
        }
    }
}

impl From<MsgType> for String {
    fn from(t: MsgType) -> Self {
        match t {
            MsgType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for MsgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message pushed by the platform. Missing fields take their zero value; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboundMessage {
    #[serde(rename = "ToUserName")]
    pub to_user_name: String,
    #[serde(rename = "FromUserName")]
    pub from_user_name: String,
    /// Unix seconds.
    #[serde(rename = "CreateTime")]
    pub create_time: i64,
    #[serde(rename = "MsgType")]
    pub msg_type: MsgType,
    /// Only meaningful for `text` messages.
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "MsgId")]
    pub msg_id: i64,
}

impl InboundMessage {
    /// Parse a request body. Only a JSON object is accepted, except that `null` decodes to an
    /// all-default message. Duplicate keys keep the last value.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice(body)? {
            Value::Object(map) => serde_json::from_value(Value::Object(map)),
            Value::Null => Ok(Self::default()),
            other => Err(serde::de::Error::custom(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reply returned in the HTTP response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReply {
    #[serde(rename = "ToUserName")]
    pub to_user_name: String,
    #[serde(rename = "FromUserName")]
    pub from_user_name: String,
    /// Unix seconds at construction, not copied from the inbound message.
    #[serde(rename = "CreateTime")]
    pub create_time: i64,
    #[serde(rename = "MsgType")]
    pub msg_type: MsgType,
    #[serde(rename = "Content")]
    pub content: String,
}

impl OutboundReply {
    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msg_type_parses_known_tags_case_sensitively() {
        assert_eq!(MsgType::from("text"), MsgType::Text);
        assert_eq!(MsgType::from("link"), MsgType::Link);
        assert_eq!(MsgType::from("Text"), MsgType::Other("Text".to_string()));
        assert_eq!(MsgType::from(""), MsgType::Other(String::new()));
        assert_eq!(String::from(MsgType::Other("event".into())), "event");
    }

    #[test]
    fn inbound_decodes_full_payload() {
        let body = br#"{
            "ToUserName": "gh_1234567890",
            "FromUserName": "o_abcdefghijklmnop",
            "CreateTime": 1640995200,
            "MsgType": "text",
            "Content": "Hello World",
            "MsgId": 12345678901234567
        }"#;
        let msg = InboundMessage::from_slice(body).expect("parse");
        assert_eq!(msg.to_user_name, "gh_1234567890");
        assert_eq!(msg.from_user_name, "o_abcdefghijklmnop");
        assert_eq!(msg.create_time, 1640995200);
        assert_eq!(msg.msg_type, MsgType::Text);
        assert_eq!(msg.content, "Hello World");
        assert_eq!(msg.msg_id, 12345678901234567);
    }

    #[test]
    fn inbound_missing_and_unknown_fields_default() {
        let msg = InboundMessage::from_slice(br#"{"MsgType":"image","Extra":[1,2]}"#).expect("parse");
        assert_eq!(msg.msg_type, MsgType::Image);
        assert_eq!(msg.to_user_name, "");
        assert_eq!(msg.create_time, 0);
        assert_eq!(msg.msg_id, 0);
    }

    #[test]
    fn inbound_null_is_default() {
        let msg = InboundMessage::from_slice(b"null").expect("parse");
        assert_eq!(msg, InboundMessage::default());
    }

    #[test]
    fn inbound_rejects_malformed_json() {
        assert!(InboundMessage::from_slice(b"{\"ToUserName\":").is_err());
        assert!(InboundMessage::from_slice(b"").is_err());
        assert!(InboundMessage::from_slice(br#"{"CreateTime":"soon"}"#).is_err());
        assert!(InboundMessage::from_slice(b"[1,2]").is_err());
        assert!(InboundMessage::from_slice(b"\"text\"").is_err());
        assert!(InboundMessage::from_slice(b"42").is_err());
    }

    #[test]
    fn inbound_rejects_arrays_even_when_well_typed() {
        let err = InboundMessage::from_slice(b"[]").expect_err("empty array");
        assert!(err.to_string().contains("expected a JSON object"), "{err}");
        assert!(InboundMessage::from_slice(br#"["gh_1","o_2",1,"text","Hi",5]"#).is_err());
    }

    #[test]
    fn inbound_duplicate_keys_keep_last_value() {
        let msg = InboundMessage::from_slice(br#"{"MsgType":"image","MsgType":"text","Content":"x"}"#)
            .expect("parse");
        assert_eq!(msg.msg_type, MsgType::Text);
        assert_eq!(msg.content, "x");
    }

    #[test]
    fn inbound_lone_surrogate_is_rejected() {
        assert!(InboundMessage::from_slice(br#"{"Content":"\ud800"}"#).is_err());
    }

    #[test]
    fn reply_is_pretty_printed_with_wire_names() {
        let reply = OutboundReply {
            to_user_name: "o_2".to_string(),
            from_user_name: "gh_1".to_string(),
            create_time: 7,
            msg_type: MsgType::Text,
            content: "Hello!".to_string(),
        };
        let json = String::from_utf8(reply.to_json_pretty().expect("encode")).expect("utf8");
        assert_eq!(
            json,
            "{\n  \"ToUserName\": \"o_2\",\n  \"FromUserName\": \"gh_1\",\n  \"CreateTime\": 7,\n  \"MsgType\": \"text\",\n  \"Content\": \"Hello!\"\n}"
        );
    }
}
