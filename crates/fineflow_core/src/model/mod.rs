//! Journal domain model.
//!
//! # Responsibility
//! - Define the records persisted by the entry store.
//! - Keep derived entry fields (`word_count`, `quality`) consistent with content.
//!
//! # Invariants
//! - Every persisted record serializes with camelCase keys.
//! - Timestamps are stored in UTC and interpreted in a caller-chosen timezone.

pub mod entry;
pub mod garden;
pub mod user;
