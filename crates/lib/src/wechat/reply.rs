//! Reply synthesis: pick reply text by message type and swap sender/recipient.

use super::message::{InboundMessage, MsgType, OutboundReply};

pub const IMAGE_REPLY: &str = "收到图片消息！";
pub const VOICE_REPLY: &str = "收到语音消息！";
pub const VIDEO_REPLY: &str = "收到视频消息！";
pub const LOCATION_REPLY: &str = "收到位置消息！";
pub const LINK_REPLY: &str = "收到链接消息！";
/// Sent for any unrecognized or empty `MsgType`.
pub const DEFAULT_REPLY: &str = "收到消息！";

/// Reply text for a message: text content gets a trailing `!`, other types get a fixed acknowledgment.
pub fn reply_content(message: &InboundMessage) -> String {
    match &message.msg_type {
        MsgType::Text => format!("{}!", message.content),
        MsgType::Image => IMAGE_REPLY.to_string(),
        MsgType::Voice => VOICE_REPLY.to_string(),
        MsgType::Video => VIDEO_REPLY.to_string(),
        MsgType::Location => LOCATION_REPLY.to_string(),
        MsgType::Link => LINK_REPLY.to_string(),
        MsgType::Other(_) => DEFAULT_REPLY.to_string(),
    }
}

/// Build the reply for `message`, stamped with the current time.
pub fn process_message(message: &InboundMessage) -> OutboundReply {
    process_message_at(message, chrono::Utc::now().timestamp())
}

/// Build the reply for `message` with an explicit creation time (Unix seconds).
pub fn process_message_at(message: &InboundMessage, now: i64) -> OutboundReply {
    OutboundReply {
        to_user_name: message.from_user_name.clone(),
        from_user_name: message.to_user_name.clone(),
        create_time: now,
        msg_type: MsgType::Text,
        content: reply_content(message),
    }
}
