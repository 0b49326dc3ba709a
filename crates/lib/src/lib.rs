//! Message push core library: config, the WeChat message model and reply rules, and the
//! HTTP gateway that serves them. Used by the CLI.

pub mod config;
pub mod gateway;
pub mod wechat;
