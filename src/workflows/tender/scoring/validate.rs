use serde_json::Value;

/// The raw material taken from a model response: narrative lists plus the
/// three required sub-scores. Derived fields the model may have echoed are
/// deliberately absent from this type.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftScores {
    pub experience: DraftCategory,
    pub team: DraftCategory,
    pub financial: DraftCategory,
    pub compliance_issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftCategory {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub score: f64,
}

/// A structured record was recovered but cannot be scored. The evaluation
/// is rejected outright; missing scores are never defaulted to zero.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("evaluation record is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("evaluation field '{0}' must be a number")]
    NonNumericScore(&'static str),
}

/// Check presence and type of the required fields and pull out the raw
/// sub-scores. Narrative lists are advisory, so absent or malformed entries
/// degrade to empty rather than failing the evaluation.
pub fn validate(record: &Value) -> Result<DraftScores, ValidationError> {
    let technical = record
        .get("technical_evaluation")
        .filter(|value| value.is_object())
        .ok_or(ValidationError::MissingField("technical_evaluation"))?;

    let experience = category(
        technical.get("experience"),
        "technical_evaluation.experience",
        "technical_evaluation.experience.score",
    )?;
    let team = category(
        technical.get("team"),
        "technical_evaluation.team",
        "technical_evaluation.team.score",
    )?;
    let financial = category(
        record.get("financial_evaluation"),
        "financial_evaluation",
        "financial_evaluation.score",
    )?;

    Ok(DraftScores {
        experience,
        team,
        financial,
        compliance_issues: string_list(record.get("compliance_issues")),
    })
}

fn category(
    value: Option<&Value>,
    section_path: &'static str,
    score_path: &'static str,
) -> Result<DraftCategory, ValidationError> {
    let section = value
        .filter(|value| value.is_object())
        .ok_or(ValidationError::MissingField(section_path))?;

    let score_field = section
        .get("score")
        .filter(|value| !value.is_null())
        .ok_or(ValidationError::MissingField(score_path))?;
    let score = score_field
        .as_f64()
        .ok_or(ValidationError::NonNumericScore(score_path))?;

    Ok(DraftCategory {
        strengths: string_list(section.get("strengths")),
        weaknesses: string_list(section.get("weaknesses")),
        score,
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
