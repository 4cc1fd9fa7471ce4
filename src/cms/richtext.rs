//! Rich-text flattening
//!
//! The content API represents text fields either as plain strings or as
//! structured block arrays (`[{ "type": "paragraph", "text": "...", ... }]`).
//! The rest of the crate only deals in plain strings, so flattening is
//! done here, at the adapter boundary.

use serde_json::Value;

/// Flatten a rich-text field to plain display text
///
/// Plain strings pass through unchanged; block arrays are joined with
/// newlines using each block's `text` field. Anything else (missing
/// field, null, unexpected shape) flattens to an empty string.
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => {
            let texts: Vec<&str> = blocks
                .iter()
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect();
            texts.join("\n")
        }
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
