use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::workflows::tender::domain::{
    EvaluationCriterion, Submission, SubmissionDocument, SubmissionId, SubmissionStatus,
};
use crate::workflows::tender::provider::{ProviderError, TextGenerator};
use crate::workflows::tender::repository::{
    EvaluationRecord, InMemoryTenderRepository, RepositoryError, TenderRepository,
};
use crate::workflows::tender::service::EvaluationService;

pub(super) fn submission() -> Submission {
    submission_for("sub-001", "Acme Civil Works", "tender-road-2026")
}

pub(super) fn submission_for(id: &str, vendor: &str, tender_id: &str) -> Submission {
    Submission {
        id: SubmissionId(id.to_string()),
        vendor_name: vendor.to_string(),
        tender_id: tender_id.to_string(),
        tender_title: "Regional Road Rehabilitation 2026".to_string(),
        tender_reference: "RFT-2026-014".to_string(),
        status: SubmissionStatus::Pending,
        score: None,
        proposal: "Full-depth reclamation of 42km of regional roadway with a \
                   14-person crew, completed over two construction seasons."
            .to_string(),
        documents: vec![
            SubmissionDocument {
                name: "Technical Proposal.pdf".to_string(),
                kind: "application/pdf".to_string(),
                size: "2.1 MB".to_string(),
                url: None,
            },
            SubmissionDocument {
                name: "Financial Schedule.xlsx".to_string(),
                kind: "application/vnd.ms-excel".to_string(),
                size: "310 KB".to_string(),
                url: None,
            },
        ],
        criteria: vec![
            EvaluationCriterion {
                title: "Relevant experience".to_string(),
                weight: 0.7,
                max_score: 70,
            },
            EvaluationCriterion {
                title: "Team composition".to_string(),
                weight: 0.3,
                max_score: 30,
            },
        ],
        submitted_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
    }
}

/// Model response payload with deliberately wrong derived fields, so tests
/// prove the reconciler never trusts them.
pub(super) fn model_payload(experience: i64, team: i64, financial: i64) -> Value {
    json!({
        "overall_score": 1,
        "technical_evaluation": {
            "experience": {
                "strengths": ["Delivered two comparable road contracts"],
                "weaknesses": ["No public-sector references"],
                "score": experience,
            },
            "team": {
                "strengths": ["Certified project lead on staff"],
                "weaknesses": [],
                "score": team,
            },
            "total_score": 999,
        },
        "financial_evaluation": {
            "strengths": ["Competitive unit rates"],
            "weaknesses": ["Optimistic contingency allowance"],
            "score": financial,
        },
        "compliance_issues": ["Missing signed declaration of non-collusion"],
        "recommendation": "award",
    })
}

pub(super) fn model_payload_text(experience: i64, team: i64, financial: i64) -> String {
    model_payload(experience, team, financial).to_string()
}

/// Generator returning one canned response body for every call.
pub(super) struct StaticGenerator {
    body: String,
}

impl StaticGenerator {
    pub(super) fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.body.clone())
    }
}

/// Generator replaying a queue of response bodies in order.
pub(super) struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub(super) fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.responses
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .ok_or_else(|| ProviderError::Transport("scripted responses exhausted".to_string()))
    }
}

/// Generator standing in for an unreachable endpoint.
pub(super) struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Transport("connection refused".to_string()))
    }
}

/// Repository whose status-update step always fails while everything else
/// delegates to an in-memory store.
#[derive(Default)]
pub(super) struct BrokenOutcomeRepository {
    pub(super) inner: InMemoryTenderRepository,
}

#[async_trait]
impl TenderRepository for BrokenOutcomeRepository {
    async fn insert_submission(
        &self,
        submission: Submission,
    ) -> Result<Submission, RepositoryError> {
        self.inner.insert_submission(submission).await
    }

    async fn fetch_submission(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<Submission>, RepositoryError> {
        self.inner.fetch_submission(id).await
    }

    async fn upsert_evaluation(
        &self,
        record: EvaluationRecord,
    ) -> Result<EvaluationRecord, RepositoryError> {
        self.inner.upsert_evaluation(record).await
    }

    async fn update_submission_outcome(
        &self,
        _id: &SubmissionId,
        _status: SubmissionStatus,
        _score: i64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable(
            "submission table offline".to_string(),
        ))
    }

    async fn evaluation_for(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        self.inner.evaluation_for(id).await
    }

    async fn evaluations_ranked(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        self.inner.evaluations_ranked().await
    }

    async fn evaluations_for_tender(
        &self,
        tender_id: &str,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        self.inner.evaluations_for_tender(tender_id).await
    }
}

pub(super) fn build_service(
    body: impl Into<String>,
) -> (
    EvaluationService<InMemoryTenderRepository, StaticGenerator>,
    Arc<InMemoryTenderRepository>,
) {
    let repository = Arc::new(InMemoryTenderRepository::default());
    let generator = Arc::new(StaticGenerator::new(body));
    let service = EvaluationService::new(repository.clone(), generator);
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
