// JSON import/export - {"tokens": [{name, label, value}, ...], "replace_existing"?: bool}

use serde::Serialize;
use serde_json::Value;

use super::TransferError;
use crate::tokens::{to_tokens, ImportRequest, Token, TokenMap};

/// Export document written by export_json
#[derive(Debug, Serialize)]
struct ExportDocument {
    tokens: Vec<Token>,
}

/// Serialize the mapping as a pretty-printed export document, in store order
pub fn export_json(tokens: &TokenMap) -> Result<String, TransferError> {
    let document = ExportDocument {
        tokens: to_tokens(tokens),
    };
    serde_json::to_string_pretty(&document).map_err(|e| TransferError::Encode(e.to_string()))
}

/// Parse an import payload.
///
/// The payload must be a JSON object with a `tokens` array; anything else is
/// rejected as a whole. Individual entries are read leniently (numbers become
/// strings, missing fields become empty) and left for the reconciliation
/// engine to validate, so one bad entry never sinks the batch.
pub fn parse_import_json(payload: &str) -> Result<ImportRequest, TransferError> {
    let document: Value =
        serde_json::from_str(payload).map_err(|e| TransferError::InvalidJson(e.to_string()))?;

    let Some(object) = document.as_object() else {
        return Err(TransferError::MissingTokens);
    };
    let Some(entries) = object.get("tokens").and_then(Value::as_array) else {
        return Err(TransferError::MissingTokens);
    };

    let tokens = entries.iter().map(token_from_value).collect();
    let replace_existing = object.get("replace_existing").is_some_and(is_truthy);

    Ok(ImportRequest {
        tokens,
        replace_existing,
    })
}

fn token_from_value(entry: &Value) -> Token {
    Token {
        name: field_text(entry, "name"),
        label: field_text(entry, "label"),
        value: field_text(entry, "value"),
    }
}

fn field_text(entry: &Value, field: &str) -> String {
    match entry.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    }
}

/// Loose truthiness for flags posted by forms ("1", "true", 1, true)
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

#[cfg(test)]
#[path = "json_test.rs"]
mod tests;
