//! Normalization of completion service replies.
//!
//! The hosted inference API does not commit to one response shape. Replies
//! are checked in a fixed priority order:
//!
//! 1. an array whose first element has a `generated_text` string
//! 2. a bare text payload
//! 3. an object with a `generated_text` string
//! 4. anything else, dumped as pretty-printed JSON
//!
//! Shapes 1-3 have the first copy of the prompt removed and are trimmed.

use serde_json::Value;

/// Field carrying the generated text in structured replies.
const GENERATED_TEXT: &str = "generated_text";

/// Turn a raw HTTP body into a payload value.
///
/// Bodies that are not valid JSON are kept as a bare string.
pub fn parse_payload(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

/// Reduce a completion payload to a single result string.
pub fn normalize_completion(payload: &Value, prompt: &str) -> String {
    if let Some(text) = payload
        .as_array()
        .and_then(|items| items.first())
        .and_then(generated_text)
    {
        return strip_prompt(text, prompt);
    }

    if let Value::String(text) = payload {
        return strip_prompt(text, prompt);
    }

    if let Some(text) = generated_text(payload) {
        return strip_prompt(text, prompt);
    }

    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

/// Non-empty `generated_text` of an object.
fn generated_text(value: &Value) -> Option<&str> {
    value
        .get(GENERATED_TEXT)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Remove the first occurrence of `prompt` and trim the remainder.
pub fn strip_prompt(text: &str, prompt: &str) -> String {
    if prompt.is_empty() {
        return text.trim().to_string();
    }
    text.replacen(prompt, "", 1).trim().to_string()
}
