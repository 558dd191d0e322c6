//! JSON extraction from analysis backend output.
//!
//! Constrained output mode usually yields bare JSON, but models still
//! occasionally wrap it in markdown fences or narrative text.

use serde_json::Value;

use super::backend::AnalysisError;

/// Extract a JSON document from raw backend text.
///
/// Strategy order:
/// 1. Try the full trimmed content as JSON.
/// 2. Extract a ```json fenced block.
/// 3. Extract any fenced block.
/// 4. Extract the first valid JSON object/array in the text.
pub fn parse_document(content: &str) -> Result<Value, AnalysisError> {
    let trimmed = content.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let candidates = [
        extract_fenced_block(trimmed, Some("json")),
        extract_fenced_block(trimmed, None),
        extract_first_json_value(trimmed),
    ];
    for candidate in candidates.into_iter().flatten() {
        if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
            return Ok(value);
        }
    }

    Err(AnalysisError::InvalidResponse(
        "Failed to extract valid JSON from analysis response".to_string(),
    ))
}

/// Extract the body of a fenced code block, optionally requiring a language
/// tag.
fn extract_fenced_block(content: &str, language: Option<&str>) -> Option<String> {
    const FENCE: &str = "```";
    let mut search = content;

    loop {
        let start = search.find(FENCE)?;
        let after_start = &search[start + FENCE.len()..];

        let line_end = after_start.find('\n')?;
        let tag = after_start[..line_end].trim();
        let rest = &after_start[line_end + 1..];

        if let Some(expected) = language {
            if !tag.eq_ignore_ascii_case(expected) {
                search = after_start;
                continue;
            }
        }

        let end = rest.find(FENCE)?;
        return Some(rest[..end].trim().to_string());
    }
}

/// Find the first valid JSON object or array in the text, using
/// `serde_json::Deserializer` to detect a valid prefix.
fn extract_first_json_value(content: &str) -> Option<String> {
    for (idx, ch) in content.char_indices() {
        if ch != '{' && ch != '[' {
            continue;
        }
        let candidate = &content[idx..];
        let mut de = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
        if let Some(Ok(_)) = de.next() {
            let end = de.byte_offset();
            if end > 0 && end <= candidate.len() {
                return Some(candidate[..end].to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direct_json() {
        let value = parse_document(r#"{ "summary": "ok", "riskScore": 5 }"#).unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[test]
    fn test_parse_json_fence() {
        let content = "Here is the report:\n```json\n{ \"riskScore\": 42 }\n```\n";
        let value = parse_document(content).unwrap();
        assert_eq!(value["riskScore"], 42);
    }

    #[test]
    fn test_parse_untagged_fence() {
        let content = "```text\n{ \"riskScore\": 7 }\n```";
        let value = parse_document(content).unwrap();
        assert_eq!(value["riskScore"], 7);
    }

    #[test]
    fn test_parse_embedded_object() {
        let content = "The model says {\"riskScore\": 3} and then rambles on";
        let value = parse_document(content).unwrap();
        assert_eq!(value["riskScore"], 3);
    }

    #[test]
    fn test_parse_failure() {
        let err = parse_document("no json anywhere").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }
}
