use crate::workflows::tender::provider::{
    completion_text, Candidate, CandidateContent, CandidatePart, GenerateResponse, ProviderError,
};

fn envelope(text: Option<&str>) -> GenerateResponse {
    GenerateResponse {
        candidates: Some(vec![Candidate {
            content: Some(CandidateContent {
                parts: Some(vec![CandidatePart {
                    text: text.map(str::to_string),
                }]),
            }),
        }]),
    }
}

#[test]
fn first_candidate_text_is_returned() {
    let result = completion_text(envelope(Some("{\"overall_score\": 70}")));
    assert_eq!(result.expect("text present"), "{\"overall_score\": 70}");
}

#[test]
fn missing_candidates_is_a_malformed_envelope() {
    let result = completion_text(GenerateResponse { candidates: None });
    assert!(matches!(result, Err(ProviderError::MalformedEnvelope)));
}

#[test]
fn empty_candidate_list_is_a_malformed_envelope() {
    let result = completion_text(GenerateResponse {
        candidates: Some(Vec::new()),
    });
    assert!(matches!(result, Err(ProviderError::MalformedEnvelope)));
}

#[test]
fn candidate_without_content_is_a_malformed_envelope() {
    let result = completion_text(GenerateResponse {
        candidates: Some(vec![Candidate { content: None }]),
    });
    assert!(matches!(result, Err(ProviderError::MalformedEnvelope)));
}

#[test]
fn content_without_parts_is_a_malformed_envelope() {
    let result = completion_text(GenerateResponse {
        candidates: Some(vec![Candidate {
            content: Some(CandidateContent { parts: None }),
        }]),
    });
    assert!(matches!(result, Err(ProviderError::MalformedEnvelope)));
}

#[test]
fn empty_parts_list_is_a_malformed_envelope() {
    let result = completion_text(GenerateResponse {
        candidates: Some(vec![Candidate {
            content: Some(CandidateContent {
                parts: Some(Vec::new()),
            }),
        }]),
    });
    assert!(matches!(result, Err(ProviderError::MalformedEnvelope)));
}

#[test]
fn part_without_text_is_a_malformed_envelope() {
    let result = completion_text(envelope(None));
    assert!(matches!(result, Err(ProviderError::MalformedEnvelope)));
}

#[test]
fn whitespace_only_text_is_an_empty_completion() {
    let result = completion_text(envelope(Some("  \n\t ")));
    assert!(matches!(result, Err(ProviderError::EmptyCompletion)));
}
