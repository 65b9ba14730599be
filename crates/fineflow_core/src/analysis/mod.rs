//! Derivation pipeline over the entry collection.
//!
//! # Responsibility
//! - Scope entries to relative periods.
//! - Classify mood and garden weather from keyword lexicons.
//! - Derive growth stage and journaling statistics from distinct entry days.
//! - Model the timed reveal of a classification result.
//!
//! # Invariants
//! - Every function here is pure over its inputs (wall-clock wrappers aside).
//! - Classifiers never depend on reveal timing.

mod lexicon;

pub mod growth;
pub mod mood;
pub mod period;
pub mod reveal;
pub mod stats;
pub mod weather;
