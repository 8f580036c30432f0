use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::llm::{GenerateContentRequest, SummaryUpstream};

/// Pulls a summary out of a decoded upstream body.
pub type ExtractionStrategy = fn(&Value) -> Option<&str>;

/// Tried in order; the first non-empty hit wins.
pub const EXTRACTION_STRATEGIES: &[(&str, ExtractionStrategy)] = &[
    ("content_object_parts", content_object_parts),
    ("content_array_parts", content_array_parts),
];

/// `candidates[0].content.parts[0].text`, the documented shape.
pub fn content_object_parts(result: &Value) -> Option<&str> {
    result
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

/// `candidates[0].content[0].parts[0].text`. Not a documented response
/// format; tolerated in case `content` comes back as an array.
pub fn content_array_parts(result: &Value) -> Option<&str> {
    result
        .get("candidates")?
        .get(0)?
        .get("content")?
        .as_array()?
        .first()?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

pub fn extract_summary(result: &Value) -> Option<&str> {
    EXTRACTION_STRATEGIES.iter().find_map(|(name, strategy)| {
        let summary = strategy(result).filter(|s| !s.is_empty())?;
        tracing::debug!(strategy = *name, "summary extracted");
        Some(summary)
    })
}

/// Keeps the first `max_chars` characters. Never splits a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn build_prompt(template: &str, content: &str) -> String {
    let mut result = String::with_capacity(template.len() + content.len() + 2);
    result.push_str(template);
    result.push_str("\n\n");
    result.push_str(content);
    result
}

/// Validated text in, summary out. Method and body checks happen before this.
pub async fn summarize_text(
    config: &Config,
    upstream: &dyn SummaryUpstream,
    text: &str,
) -> Result<String> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::Misconfigured("GEMINI_API_KEY is not set".to_string()))?;

    let input = truncate_chars(text, config.max_input_chars);
    if input.len() < text.len() {
        tracing::info!(
            original_chars = text.chars().count(),
            kept_chars = config.max_input_chars,
            "input truncated"
        );
    }

    let request = GenerateContentRequest::from_prompt(build_prompt(&config.prompt_template, input));
    let result = upstream
        .generate_content(api_key, &config.model_id, &request)
        .await?;

    extract_summary(&result)
        .map(str::to_string)
        .ok_or_else(|| AppError::ExtractionFailed(format!("no summary text in upstream body: {}", result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_documented_shape() {
        let body = json!({"candidates":[{"content":{"parts":[{"text":"Hello summary"}]}}]});
        assert_eq!(extract_summary(&body), Some("Hello summary"));
    }

    #[test]
    fn falls_back_to_array_content() {
        let body = json!({"candidates":[{"content":[{"parts":[{"text":"Alt shape"}]}]}]});
        assert_eq!(content_object_parts(&body), None);
        assert_eq!(extract_summary(&body), Some("Alt shape"));
    }

    #[test]
    fn empty_text_is_not_a_summary() {
        let body = json!({"candidates":[{"content":{"parts":[{"text":""}]}}]});
        assert_eq!(extract_summary(&body), None);
    }

    #[test]
    fn nothing_to_extract() {
        for body in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates":[{"finishReason":"SAFETY"}]}),
            json!({"candidates":[{"content":{"parts":[{"text": 7}]}}]}),
        ] {
            assert_eq!(extract_summary(&body), None, "{}", body);
        }
    }

    #[test]
    fn truncation_keeps_prefix_by_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("日本語テキスト", 2), "日本");
    }

    #[test]
    fn prompt_prepends_instruction() {
        assert_eq!(
            build_prompt("Summarize:", "some text"),
            "Summarize:\n\nsome text"
        );
    }
}
