use super::super::domain::Recommendation;

/// Documented range caps for the raw sub-scores.
pub const EXPERIENCE_MAX: i64 = 70;
pub const TEAM_MAX: i64 = 30;
pub const FINANCIAL_MAX: i64 = 100;

/// Weighting of the combined experience+team score into the technical total,
/// and of technical/financial into the overall score.
pub const TECHNICAL_WEIGHT: f64 = 0.7;
pub const FINANCIAL_WEIGHT: f64 = 0.3;

/// Recommendation thresholds on the overall score.
pub const AWARD_THRESHOLD: i64 = 70;
pub const REJECT_THRESHOLD: i64 = 50;

/// Uniform rounding rule for every derived score: round half up.
/// Rubric scores never go below zero, so negative inputs floor to 0.
pub fn round_half_up(value: f64) -> i64 {
    (value.max(0.0) + 0.5).floor() as i64
}

/// `total_score = round((experience + team) * 0.7)`
pub fn technical_total(experience: i64, team: i64) -> i64 {
    round_half_up((experience + team) as f64 * TECHNICAL_WEIGHT)
}

/// `overall_score = round(technical_total * 0.7 + financial * 0.3)`
pub fn overall_score(technical_total: i64, financial: i64) -> i64 {
    round_half_up(technical_total as f64 * TECHNICAL_WEIGHT + financial as f64 * FINANCIAL_WEIGHT)
}

/// Award at 70 and above, reject below 50, conditional in between.
pub fn recommend_for(overall: i64) -> Recommendation {
    if overall >= AWARD_THRESHOLD {
        Recommendation::Award
    } else if overall < REJECT_THRESHOLD {
        Recommendation::Reject
    } else {
        Recommendation::Conditional
    }
}
