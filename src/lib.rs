//! AI-assisted evaluation pipeline for procurement tender submissions.
//!
//! The tender workflow takes a vendor submission, renders it into a rubric
//! prompt, asks a text-generation endpoint to score it, recovers a structured
//! record from the raw response, reconciles the scores against the fixed
//! rubric formulas, and persists the result exactly once per submission.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
