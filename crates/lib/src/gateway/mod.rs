//! Gateway: HTTP server for the message push endpoint.
//!
//! Single port. `POST /message-push` takes a platform message and answers synchronously with
//! the reply JSON; `GET /` is a health probe.

mod error;
mod server;

pub use error::PushError;
pub use server::{router, run_gateway, GatewayState, MESSAGE_PUSH_PATH};
