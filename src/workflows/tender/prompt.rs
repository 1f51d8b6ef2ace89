use super::domain::Submission;

/// Instruction template sent to the text-generation endpoint. The
/// `{submission}` marker is replaced with the serialized submission; the
/// rubric weights and thresholds here must stay in lockstep with
/// [`super::scoring::rubric`].
const RUBRIC_PROMPT: &str = r#"You are an expert procurement evaluation AI. Evaluate this tender submission objectively and assign numerical scores.

**Submission Data:**
{submission}

**Evaluation Instructions:**
1. ALWAYS provide numerical scores for every category.
2. NEVER return null or undefined values.
3. BE OBJECTIVE in your assessment of strengths and weaknesses.
4. FOLLOW THE SCORING FORMULA exactly as specified.

**Required Evaluation Format:**
Your response MUST be valid JSON with these exact fields:
{
  "overall_score": <REQUIRED: integer 0-100>,
  "technical_evaluation": {
    "experience": {
      "strengths": ["specific strengths found in the submission"],
      "weaknesses": ["specific weaknesses found in the submission"],
      "score": <REQUIRED: integer 0-70>
    },
    "team": {
      "strengths": ["specific strengths found in the submission"],
      "weaknesses": ["specific weaknesses found in the submission"],
      "score": <REQUIRED: integer 0-30>
    },
    "total_score": <REQUIRED: integer 0-100, calculated as below>
  },
  "financial_evaluation": {
    "strengths": ["specific strengths found in the submission"],
    "weaknesses": ["specific weaknesses found in the submission"],
    "score": <REQUIRED: integer 0-100>
  },
  "compliance_issues": ["any critical omissions or incomplete documents"],
  "recommendation": <REQUIRED: "award", "reject", or "conditional">
}

**Scoring Rules:**
- Technical Score Calculation: total_score = (experience score + team score) * 0.7
- Overall Score Formula: overall_score = (total_score * 0.7) + (financial score * 0.3)
- Recommendation: overall_score >= 70 = "award", overall_score < 50 = "reject", otherwise "conditional"
- All scores MUST be integer values, not null or undefined

**Quality Check:**
Before submitting your response, verify:
1. All required fields have numerical values
2. No null or undefined values exist
3. Score calculations follow the specified formulas
4. The JSON structure is valid and can be parsed

Your evaluation must be data-driven and based directly on the submission's content."#;

/// Failure to render a submission into a prompt.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("submission {submission_id} could not be serialized: {source}")]
    Serialize {
        submission_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Render the rubric prompt for one submission. Pure and deterministic:
/// the same submission always yields the same prompt.
pub fn build_prompt(submission: &Submission) -> Result<String, PromptError> {
    let serialized =
        serde_json::to_string_pretty(submission).map_err(|source| PromptError::Serialize {
            submission_id: submission.id.0.clone(),
            source,
        })?;

    Ok(RUBRIC_PROMPT.replace("{submission}", &serialized))
}
