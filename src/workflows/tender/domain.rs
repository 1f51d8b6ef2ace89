use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for vendor submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle states of a submission as tracked by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Evaluated,
    Recommended,
    Rejected,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Evaluated => "evaluated",
            SubmissionStatus::Recommended => "recommended",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

/// Metadata for an uploaded bid document; the blob itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDocument {
    pub name: String,
    pub kind: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Weighted criterion attached to the tender the submission answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCriterion {
    pub title: String,
    pub weight: f32,
    pub max_score: i64,
}

/// A vendor's bid for one tender. Read-only input to the evaluation
/// pipeline; only `status` and `score` are mutated by this workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub vendor_name: String,
    pub tender_id: String,
    pub tender_title: String,
    pub tender_reference: String,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    pub proposal: String,
    pub documents: Vec<SubmissionDocument>,
    pub criteria: Vec<EvaluationCriterion>,
    pub submitted_at: DateTime<Utc>,
}

/// Strengths/weaknesses narrative plus the numeric score for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAssessment {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub score: i64,
}

/// Technical portion of an evaluation; `total_score` is always recomputed
/// from the experience and team sub-scores, never taken from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAssessment {
    pub experience: CategoryAssessment,
    pub team: CategoryAssessment,
    pub total_score: i64,
}

/// Award decision derived from the overall score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Award,
    Reject,
    Conditional,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Award => "award",
            Recommendation::Reject => "reject",
            Recommendation::Conditional => "conditional",
        }
    }
}

/// The structured, reconciled scoring result for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub application_id: SubmissionId,
    pub vendor_name: String,
    pub tender_title: String,
    pub overall_score: i64,
    pub technical: TechnicalAssessment,
    pub financial: CategoryAssessment,
    pub compliance_issues: Vec<String>,
    pub recommendation: Recommendation,
    /// Range clamps applied during reconciliation, empty when the model
    /// stayed inside the documented score ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub score_adjustments: Vec<String>,
    pub created_at: DateTime<Utc>,
}
