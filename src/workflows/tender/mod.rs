//! Tender submission evaluation workflow.
//!
//! A submission flows through five stages: prompt rendering, the
//! text-generation call, structured-record extraction, score validation and
//! reconciliation, and idempotent persistence. Stages before the store are
//! pure or side-effect free, so any failure aborts without a write.

pub mod domain;
pub mod extract;
pub mod prompt;
pub mod provider;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryAssessment, Evaluation, EvaluationCriterion, Recommendation, Submission,
    SubmissionDocument, SubmissionId, SubmissionStatus, TechnicalAssessment,
};
pub use extract::ExtractionError;
pub use prompt::PromptError;
pub use provider::{GeminiClient, GenerationParams, ProviderError, TextGenerator};
pub use repository::{
    EvaluationRecord, InMemoryTenderRepository, RepositoryError, TenderRepository,
};
pub use router::tender_router;
pub use scoring::ValidationError;
pub use service::{EvaluateError, EvaluationService};
