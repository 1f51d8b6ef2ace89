use serde_json::{Map, Value};

/// No structured record could be recovered from the model's response.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("response contained no parseable JSON object")]
    NoStructuredRecord,
    #[error("response parsed to an empty record")]
    EmptyRecord,
}

/// Recover a JSON object from raw model output.
///
/// Ordered fallback chain, first success wins:
/// 1. parse the whole text directly,
/// 2. parse the span from the first `{` to the last `}`,
/// 3. strip surrounding code fences and parse the remainder.
///
/// Cheapest-first ordering keeps the literal reading of the text ahead of
/// progressively more aggressive recovery.
pub fn extract_record(raw: &str) -> Result<Value, ExtractionError> {
    let trimmed = raw.trim();

    let record = parse_object(trimmed)
        .or_else(|| braced_span(trimmed).and_then(parse_object))
        .or_else(|| {
            strip_code_fences(trimmed)
                .as_deref()
                .and_then(parse_object)
        })
        .ok_or(ExtractionError::NoStructuredRecord)?;

    if record.is_empty() {
        return Err(ExtractionError::EmptyRecord);
    }

    Ok(Value::Object(record))
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn braced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Remove triple-backtick fence markers (with an optional `json` tag) so a
/// fenced payload can be parsed as a whole.
fn strip_code_fences(text: &str) -> Option<String> {
    if !text.contains("```") {
        return None;
    }

    let cleaned = text.replace("```json", "").replace("```", "");
    Some(cleaned.trim().to_string())
}
