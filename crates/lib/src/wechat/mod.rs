//! WeChat message push: inbound message model and reply synthesis.
//!
//! The platform POSTs one JSON message per event; the reply is returned synchronously in the
//! HTTP response with sender and recipient swapped.

mod message;
mod reply;

pub use message::{InboundMessage, MsgType, OutboundReply};
pub use reply::{
    process_message, process_message_at, reply_content, DEFAULT_REPLY, IMAGE_REPLY, LINK_REPLY,
    LOCATION_REPLY, VIDEO_REPLY, VOICE_REPLY,
};
