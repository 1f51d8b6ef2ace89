use super::common::model_payload_text;
use crate::workflows::tender::extract::{extract_record, ExtractionError};

#[test]
fn pure_json_parses_directly() {
    let raw = model_payload_text(50, 20, 90);
    let record = extract_record(&raw).expect("direct parse succeeds");
    assert_eq!(
        record
            .pointer("/technical_evaluation/experience/score")
            .and_then(serde_json::Value::as_i64),
        Some(50)
    );
}

#[test]
fn json_with_surrounding_whitespace_parses_directly() {
    let raw = format!("\n\n  {}  \n", model_payload_text(10, 5, 20));
    assert!(extract_record(&raw).is_ok());
}

#[test]
fn recovers_object_embedded_in_prose() {
    let raw = format!(
        "Based on the submission, here is my assessment: {} I hope this helps.",
        model_payload_text(60, 30, 95)
    );
    let record = extract_record(&raw).expect("braced span recovered");
    assert_eq!(
        record
            .pointer("/financial_evaluation/score")
            .and_then(serde_json::Value::as_i64),
        Some(95)
    );
}

#[test]
fn recovers_fenced_json_block() {
    let raw = format!(
        "Here is the result:\n```json\n{}\n```",
        model_payload_text(50, 20, 90)
    );
    let record = extract_record(&raw).expect("fenced block recovered");
    assert_eq!(
        record
            .pointer("/technical_evaluation/team/score")
            .and_then(serde_json::Value::as_i64),
        Some(20)
    );
}

#[test]
fn recovers_bare_fenced_block_without_language_tag() {
    let raw = format!("```\n{}\n```", model_payload_text(10, 5, 20));
    assert!(extract_record(&raw).is_ok());
}

#[test]
fn fails_when_no_json_present() {
    let raw = "I was unable to evaluate this submission.";
    assert_eq!(
        extract_record(raw),
        Err(ExtractionError::NoStructuredRecord)
    );
}

#[test]
fn fails_on_non_object_payload() {
    assert_eq!(
        extract_record("42"),
        Err(ExtractionError::NoStructuredRecord)
    );
    assert_eq!(
        extract_record("[1, 2, 3]"),
        Err(ExtractionError::NoStructuredRecord)
    );
}

#[test]
fn fails_on_empty_record() {
    assert_eq!(extract_record("{}"), Err(ExtractionError::EmptyRecord));
    assert_eq!(
        extract_record("```json\n{}\n```"),
        Err(ExtractionError::EmptyRecord)
    );
}

#[test]
fn fails_on_truncated_json() {
    let raw = r#"{"technical_evaluation": {"experience": {"score": 50"#;
    assert_eq!(
        extract_record(raw),
        Err(ExtractionError::NoStructuredRecord)
    );
}
