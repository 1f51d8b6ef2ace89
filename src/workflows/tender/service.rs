use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{Evaluation, Recommendation, Submission, SubmissionId, SubmissionStatus};
use super::extract::{extract_record, ExtractionError};
use super::prompt::{build_prompt, PromptError};
use super::provider::{ProviderError, TextGenerator};
use super::repository::{EvaluationRecord, RepositoryError, TenderRepository};
use super::scoring::{reconcile, validate, ValidationError};

/// Service composing the prompt builder, provider adapter, extraction,
/// reconciliation, and the evaluation store.
pub struct EvaluationService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R, G> EvaluationService<R, G>
where
    R: TenderRepository + 'static,
    G: TextGenerator + 'static,
{
    pub fn new(repository: Arc<R>, generator: Arc<G>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Register a vendor submission so it can be evaluated later.
    pub async fn submit(&self, mut submission: Submission) -> Result<Submission, EvaluateError> {
        submission.status = SubmissionStatus::Pending;
        submission.score = None;
        let stored = self.repository.insert_submission(submission).await?;
        Ok(stored)
    }

    /// Run the full evaluation pipeline for one submission.
    ///
    /// Stages before the store are free of side effects, so any failure
    /// leaves no partial state; re-invoking after any error is safe because
    /// persistence is an upsert keyed on the submission id.
    pub async fn evaluate(&self, id: &SubmissionId) -> Result<EvaluationRecord, EvaluateError> {
        let submission = self
            .repository
            .fetch_submission(id)
            .await?
            .ok_or_else(|| EvaluateError::SubmissionNotFound(id.0.clone()))?;

        let prompt = build_prompt(&submission)?;
        let raw = self.generator.generate(&prompt).await?;
        let record = extract_record(&raw)?;
        let draft = validate(&record)?;
        let scores = reconcile(draft);

        if !scores.adjustments.is_empty() {
            warn!(
                submission = %id,
                adjustments = scores.adjustments.len(),
                "model scores fell outside the rubric ranges and were clamped"
            );
        }

        let evaluation = Evaluation {
            application_id: submission.id.clone(),
            vendor_name: submission.vendor_name.clone(),
            tender_title: submission.tender_title.clone(),
            overall_score: scores.overall_score,
            technical: scores.technical,
            financial: scores.financial,
            compliance_issues: scores.compliance_issues,
            recommendation: scores.recommendation,
            score_adjustments: scores.adjustments,
            created_at: Utc::now(),
        };

        let stored = self
            .repository
            .upsert_evaluation(EvaluationRecord::from_evaluation(evaluation))
            .await?;

        // The evaluation is already durable at this point; a failed status
        // update must not surface as a failed evaluation.
        let status = match stored.recommendation {
            Recommendation::Reject => SubmissionStatus::Rejected,
            Recommendation::Award | Recommendation::Conditional => SubmissionStatus::Evaluated,
        };
        if let Err(err) = self
            .repository
            .update_submission_outcome(id, status, stored.score)
            .await
        {
            warn!(
                submission = %id,
                error = %err,
                "evaluation stored but submission status update failed"
            );
        }

        info!(
            submission = %id,
            overall = stored.score,
            technical = stored.technical_score,
            financial = stored.financial_score,
            recommendation = stored.recommendation.label(),
            "submission evaluated"
        );

        Ok(stored)
    }

    /// Stored evaluation for one submission, if any.
    pub async fn evaluation_for(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<EvaluationRecord>, EvaluateError> {
        Ok(self.repository.evaluation_for(id).await?)
    }

    /// All evaluations ranked by overall score, highest first.
    pub async fn ranked(&self) -> Result<Vec<EvaluationRecord>, EvaluateError> {
        Ok(self.repository.evaluations_ranked().await?)
    }

    /// Evaluations for one tender ranked by overall score.
    pub async fn ranked_for_tender(
        &self,
        tender_id: &str,
    ) -> Result<Vec<EvaluationRecord>, EvaluateError> {
        Ok(self.repository.evaluations_for_tender(tender_id).await?)
    }
}

/// Terminal outcomes of an `evaluate` invocation. Exactly one of a complete
/// stored evaluation or one of these errors is ever observed by a caller.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    #[error("submission {0} not found")]
    SubmissionNotFound(String),
    #[error(transparent)]
    Input(#[from] PromptError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("evaluation could not be persisted: {0}")]
    Persistence(#[from] RepositoryError),
}
