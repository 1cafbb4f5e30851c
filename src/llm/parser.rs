use crate::error::{Error, Result};
use crate::models::AiInsight;

pub fn parse_narrative_response(response: &str) -> Result<AiInsight> {
    let json_str = extract_json(response)?;

    let insight: AiInsight = serde_json::from_str(&json_str)
        .map_err(|e| Error::ParseError(format!("Failed to parse narrative response: {}", e)))?;

    if insight.professional_summary.trim().is_empty() {
        return Err(Error::ParseError(
            "Narrative response has an empty professional_summary".to_string(),
        ));
    }

    Ok(insight)
}

/// Pull the first JSON object out of a model reply, whether it is fenced
/// in a code block or embedded in prose.
fn extract_json(text: &str) -> Result<String> {
    if let Some(fenced) = fenced_block(text) {
        if fenced.starts_with('{') {
            return Ok(fenced.to_string());
        }
    }

    balanced_object(text)
        .map(str::to_string)
        .ok_or_else(|| Error::ParseError("No valid JSON found in response".to_string()))
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip the info string (`json`, `JSON`, ...) on the fence line.
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecommendationKind;

    #[test]
    fn test_extract_json_from_markdown() {
        let input = r#"Here's the assessment:
```json
{"professional_summary": "Builds tools."}
```
"#;
        let result = extract_json(input).unwrap();
        assert_eq!(result, r#"{"professional_summary": "Builds tools."}"#);
    }

    #[test]
    fn test_extract_raw_json() {
        let input = r#"The result is {"professional_summary": "x", "recommendations": []} done"#;
        let result = extract_json(input).unwrap();
        assert_eq!(result, r#"{"professional_summary": "x", "recommendations": []}"#);
    }

    #[test]
    fn test_extract_handles_multibyte_prose() {
        let input = r#"Voilà, résumé: {"professional_summary": "Écrit des outils \"rapides\"."}"#;
        let insight = parse_narrative_response(input).unwrap();
        assert!(insight.professional_summary.starts_with("Écrit"));
    }

    #[test]
    fn test_parse_full_insight() {
        let input = r#"{
            "professional_summary": "Backend engineer focused on Rust services.",
            "recruiter_tip": "Ask about the async runtime work.",
            "key_strength": "Systems depth",
            "recommendations": [
                {"type": "easy-win", "title": "Pin Projects", "text": "Pin your top three repositories."},
                {"type": "strategic", "title": "Write Tests", "text": "Add CI to your main project."}
            ]
        }"#;
        let insight = parse_narrative_response(input).unwrap();
        assert_eq!(insight.key_strength, "Systems depth");
        assert_eq!(insight.recommendations.len(), 2);
        assert_eq!(insight.recommendations[0].kind, RecommendationKind::EasyWin);
        // Unknown types fold into info.
        assert_eq!(insight.recommendations[1].kind, RecommendationKind::Info);
    }

    #[test]
    fn test_parse_rejects_malformed_payloads() {
        assert!(parse_narrative_response("I cannot help with that.").is_err());
        assert!(parse_narrative_response(r#"{"recruiter_tip": "hi"}"#).is_err());
        assert!(parse_narrative_response(r#"{"professional_summary": "  "}"#).is_err());
    }
}
