use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Inbound body. `text` is kept loose so a non-string value is a 400, not a
/// deserialization failure.
#[derive(Debug, Default)]
pub struct SummarizeRequest {
    pub text: Option<Value>,
}

impl SummarizeRequest {
    /// Only a JSON object carries fields; anything else has no `text`.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::InvalidInput(format!("body is not valid JSON: {}", e)))?;
        match value {
            Value::Object(mut fields) => Ok(SummarizeRequest {
                text: fields.remove("text").filter(|text| !text.is_null()),
            }),
            other => Err(AppError::InvalidInput(format!(
                "body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// The non-empty `text` string, or `InvalidInput`.
    pub fn into_text(self) -> Result<String> {
        match self.text {
            Some(Value::String(text)) if !text.is_empty() => Ok(text),
            Some(Value::String(_)) => Err(AppError::InvalidInput("`text` is empty".to_string())),
            Some(other) => Err(AppError::InvalidInput(format!(
                "`text` must be a string, got {}",
                json_kind(&other)
            ))),
            None => Err(AppError::InvalidInput("`text` is missing".to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Serialize, Debug)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(body: &str) -> Result<String> {
        SummarizeRequest::from_body(body.as_bytes())?.into_text()
    }

    #[test]
    fn accepts_non_empty_string() {
        assert_eq!(text_of(r#"{"text":"hello"}"#).unwrap(), "hello");
    }

    #[test]
    fn rejects_missing_empty_and_non_string_text() {
        for body in [
            "",
            "{}",
            r#"{"text":""}"#,
            r#"{"text":null}"#,
            r#"{"text":42}"#,
            r#"{"text":["a"]}"#,
            "not json",
            r#""just a string""#,
            r#"["hello"]"#,
            "42",
        ] {
            assert!(
                matches!(text_of(body), Err(AppError::InvalidInput(_))),
                "body {:?} should be rejected",
                body
            );
        }
    }
}
