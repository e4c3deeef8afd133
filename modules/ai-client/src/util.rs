use serde::de::DeserializeOwned;

use crate::error::JsonExtractError;

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Strip markdown code blocks from a response.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parse a model response into `T`.
///
/// Code fences are stripped first. Text that is not JSON at all is reported as
/// [`JsonExtractError::Malformed`]; valid JSON of the wrong shape as
/// [`JsonExtractError::SchemaMismatch`].
pub fn extract_json<T: DeserializeOwned>(response: &str) -> Result<T, JsonExtractError> {
    let cleaned = strip_code_blocks(response);
    if cleaned.is_empty() {
        return Err(JsonExtractError::Empty);
    }

    let value: serde_json::Value = serde_json::from_str(cleaned)
        .map_err(|e| JsonExtractError::Malformed(e.to_string()))?;

    serde_json::from_value(value).map_err(|e| JsonExtractError::SchemaMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct City {
        city: String,
        latitude: f64,
    }

    #[test]
    fn test_truncate_to_char_boundary() {
        let text = "Hello 世界";
        let truncated = truncate_to_char_boundary(text, 8);
        assert!(truncated.len() <= 8);
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn test_truncate_within_bounds() {
        let text = "Hello";
        assert_eq!(truncate_to_char_boundary(text, 100), "Hello");
    }

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
    }

    #[test]
    fn extract_json_accepts_fenced_array() {
        let text = "```json\n[{\"city\": \"Oslo\", \"latitude\": 59.91}]\n```";
        let cities: Vec<City> = extract_json(text).unwrap();
        assert_eq!(
            cities,
            vec![City {
                city: "Oslo".into(),
                latitude: 59.91
            }]
        );
    }

    #[test]
    fn extract_json_reports_empty() {
        assert_eq!(
            extract_json::<Vec<City>>("  ```json\n```  "),
            Err(JsonExtractError::Empty)
        );
        assert_eq!(extract_json::<Vec<City>>(""), Err(JsonExtractError::Empty));
    }

    #[test]
    fn extract_json_reports_malformed() {
        let err = extract_json::<Vec<City>>("Sure! Here are some cities:").unwrap_err();
        assert!(matches!(err, JsonExtractError::Malformed(_)));
    }

    #[test]
    fn extract_json_reports_schema_mismatch() {
        let err = extract_json::<Vec<City>>("{\"city\": \"Oslo\"}").unwrap_err();
        assert!(matches!(err, JsonExtractError::SchemaMismatch(_)));

        let err = extract_json::<Vec<City>>("[{\"city\": \"Oslo\"}]").unwrap_err();
        assert!(matches!(err, JsonExtractError::SchemaMismatch(_)));
    }
}
