use super::super::domain::{CategoryAssessment, Recommendation, TechnicalAssessment};
use super::rubric::{
    overall_score, recommend_for, round_half_up, technical_total, EXPERIENCE_MAX, FINANCIAL_MAX,
    TEAM_MAX,
};
use super::validate::{DraftCategory, DraftScores};

/// Authoritative scores derived from the validated raw sub-scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledScores {
    pub technical: TechnicalAssessment,
    pub financial: CategoryAssessment,
    pub compliance_issues: Vec<String>,
    pub overall_score: i64,
    pub recommendation: Recommendation,
    pub adjustments: Vec<String>,
}

/// Recompute every derived field from the raw sub-scores. Out-of-range
/// sub-scores are clamped to the documented cap and the clamp recorded.
pub fn reconcile(draft: DraftScores) -> ReconciledScores {
    let mut adjustments = Vec::new();

    let experience = settle(draft.experience, EXPERIENCE_MAX, "experience", &mut adjustments);
    let team = settle(draft.team, TEAM_MAX, "team", &mut adjustments);
    let financial = settle(draft.financial, FINANCIAL_MAX, "financial", &mut adjustments);

    let total_score = technical_total(experience.score, team.score);
    let overall = overall_score(total_score, financial.score);

    ReconciledScores {
        technical: TechnicalAssessment {
            experience,
            team,
            total_score,
        },
        financial,
        compliance_issues: draft.compliance_issues,
        overall_score: overall,
        recommendation: recommend_for(overall),
        adjustments,
    }
}

fn settle(
    draft: DraftCategory,
    max: i64,
    label: &str,
    adjustments: &mut Vec<String>,
) -> CategoryAssessment {
    let rounded = round_half_up(draft.score);
    let clamped = rounded.clamp(0, max);
    if clamped != rounded {
        adjustments.push(format!(
            "{label} score {rounded} clamped to the 0-{max} range"
        ));
    }

    CategoryAssessment {
        strengths: draft.strengths,
        weaknesses: draft.weaknesses,
        score: clamped,
    }
}
