//! HTTP and WebSocket server for pairdebug.
//!
//! This crate provides:
//! - `POST /api/debug`, which forwards code to a completion service
//! - `GET /api/test` and `GET /health` probes
//! - `GET /ws`, a room-scoped relay for code edits and debug results

pub mod debugger;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod relay;
pub mod server;

pub use debugger::{build_prompt, Debugger, NO_ISSUES_PLACEHOLDER, PROMPT_PREAMBLE};
pub use error::{ErrorBody, GatewayError};
pub use protocol::{ClientEvent, CodeUpdate, DebugResultUpdate, ServerEvent};
pub use relay::{Inbox, RoomRelay};
pub use server::{Gateway, GatewayState};

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
