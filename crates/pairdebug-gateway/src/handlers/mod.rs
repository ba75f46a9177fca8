//! HTTP route handlers.

pub mod debug;
pub mod health;

pub use debug::{debug_handler, DebugResponse};
pub use health::{health_handler, liveness_handler, HealthResponse, LIVENESS_MESSAGE};
