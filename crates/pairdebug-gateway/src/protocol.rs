//! Real-time wire protocol.
//!
//! Every WebSocket text frame is a JSON envelope `{"event": ..., "data": ...}`.

use pairdebug_core::RoomId;
use serde::{Deserialize, Serialize};

/// Event sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join a room by name.
    JoinRoom(RoomId),

    /// Full current code text for a room.
    CodeUpdate(CodeUpdate),

    /// Full debug result text for a room.
    DebugResult(DebugResultUpdate),
}

/// Payload of a client `code-update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeUpdate {
    pub room_id: RoomId,
    pub code: String,
}

/// Payload of a client `debug-result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResultUpdate {
    pub room_id: RoomId,
    pub result: String,
}

/// Event delivered to room peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    CodeUpdate(String),
    DebugResult(String),
}

impl ServerEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CodeUpdate(_) => "code-update",
            Self::DebugResult(_) => "debug-result",
        }
    }
}

impl ClientEvent {
    /// Parse a text frame.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
