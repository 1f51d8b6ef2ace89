//! Score validation and reconciliation.
//!
//! The model is instructed to compute the rubric formulas but cannot be
//! trusted to do so correctly, so every derived figure (`total_score`,
//! `overall_score`, `recommendation`) is recomputed here from the raw
//! sub-scores. The model's echoed numbers are never read back.

pub mod reconcile;
pub mod rubric;
pub mod validate;

pub use reconcile::{reconcile, ReconciledScores};
pub use rubric::{recommend_for, round_half_up};
pub use validate::{validate, DraftCategory, DraftScores, ValidationError};
