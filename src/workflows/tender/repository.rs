use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Evaluation, Recommendation, Submission, SubmissionId, SubmissionStatus};

/// Persisted evaluation row: the ranking columns are flattened out of the
/// structured payload so listings can sort without unpacking it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub application_id: SubmissionId,
    pub vendor_name: String,
    pub tender_title: String,
    pub score: i64,
    pub technical_score: i64,
    pub financial_score: i64,
    pub recommendation: Recommendation,
    pub created_at: DateTime<Utc>,
    pub evaluation: Evaluation,
}

impl EvaluationRecord {
    pub fn from_evaluation(evaluation: Evaluation) -> Self {
        Self {
            application_id: evaluation.application_id.clone(),
            vendor_name: evaluation.vendor_name.clone(),
            tender_title: evaluation.tender_title.clone(),
            score: evaluation.overall_score,
            technical_score: evaluation.technical.total_score,
            financial_score: evaluation.financial.score,
            recommendation: evaluation.recommendation,
            created_at: evaluation.created_at,
            evaluation,
        }
    }
}

/// Error enumeration for persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Storage abstraction over the submissions and evaluations collections.
///
/// `upsert_evaluation` must be an atomic insert-or-replace keyed on
/// `application_id`; concurrent writers for the same submission are
/// last-write-wins, never duplicated.
#[async_trait]
pub trait TenderRepository: Send + Sync {
    async fn insert_submission(&self, submission: Submission)
        -> Result<Submission, RepositoryError>;
    async fn fetch_submission(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<Submission>, RepositoryError>;
    /// Atomic insert-or-replace keyed on `application_id`.
    async fn upsert_evaluation(
        &self,
        record: EvaluationRecord,
    ) -> Result<EvaluationRecord, RepositoryError>;
    /// Best-effort follow-up after a successful upsert.
    async fn update_submission_outcome(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
        score: i64,
    ) -> Result<(), RepositoryError>;
    async fn evaluation_for(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError>;
    /// All evaluations, highest score first.
    async fn evaluations_ranked(&self) -> Result<Vec<EvaluationRecord>, RepositoryError>;
    /// Evaluations for submissions belonging to one tender, highest first.
    async fn evaluations_for_tender(
        &self,
        tender_id: &str,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

/// Mutex-guarded in-memory store backing the demo binary and the tests.
#[derive(Default, Clone)]
pub struct InMemoryTenderRepository {
    submissions: Arc<Mutex<HashMap<SubmissionId, Submission>>>,
    evaluations: Arc<Mutex<HashMap<SubmissionId, EvaluationRecord>>>,
}

#[async_trait]
impl TenderRepository for InMemoryTenderRepository {
    async fn insert_submission(
        &self,
        submission: Submission,
    ) -> Result<Submission, RepositoryError> {
        let mut guard = self.submissions.lock().expect("submission mutex poisoned");
        if guard.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn fetch_submission(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<Submission>, RepositoryError> {
        let guard = self.submissions.lock().expect("submission mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn upsert_evaluation(
        &self,
        record: EvaluationRecord,
    ) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.evaluations.lock().expect("evaluation mutex poisoned");
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_submission_outcome(
        &self,
        id: &SubmissionId,
        status: SubmissionStatus,
        score: i64,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.submissions.lock().expect("submission mutex poisoned");
        let submission = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        submission.status = status;
        submission.score = Some(score);
        Ok(())
    }

    async fn evaluation_for(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.evaluations.lock().expect("evaluation mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn evaluations_ranked(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.evaluations.lock().expect("evaluation mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(records)
    }

    async fn evaluations_for_tender(
        &self,
        tender_id: &str,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let submission_ids: Vec<SubmissionId> = {
            let guard = self.submissions.lock().expect("submission mutex poisoned");
            guard
                .values()
                .filter(|submission| submission.tender_id == tender_id)
                .map(|submission| submission.id.clone())
                .collect()
        };

        let guard = self.evaluations.lock().expect("evaluation mutex poisoned");
        let mut records: Vec<_> = submission_ids
            .iter()
            .filter_map(|id| guard.get(id).cloned())
            .collect();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(records)
    }
}
