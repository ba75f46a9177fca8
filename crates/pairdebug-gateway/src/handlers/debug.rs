//! `POST /api/debug`.

use crate::error::GatewayError;
use crate::server::GatewayState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};

/// Successful response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    pub debug_result: String,
}

/// Run the debugger over the submitted code.
///
/// The body is read leniently. A request without a JSON content type counts
/// as an empty object, and whatever `code` holds is rendered to text and
/// forwarded. Only a body that claims to be JSON and fails to parse is
/// rejected.
pub async fn debug_handler(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DebugResponse>, GatewayError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Default::default()),
        Err(rejection) => {
            warn!("Rejected debug request body: {}", rejection.body_text());
            return Err(GatewayError::InvalidBody(rejection.body_text()));
        }
    };

    let code = code_text(body.get("code"));
    match state.debugger.debug(&code).await {
        Ok(debug_result) => Ok(Json(DebugResponse { debug_result })),
        Err(e) => {
            error!("Error debugging code: {}", e);
            Err(e.into())
        }
    }
}

/// Render a `code` value as text.
///
/// Absent values become `undefined`, arrays join their elements with commas
/// and objects collapse to `[object Object]`.
fn code_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => code_text(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
        Some(other) => other.to_string(),
    }
}
