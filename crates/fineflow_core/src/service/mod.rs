//! Use-case services over the entry store.
//!
//! # Responsibility
//! - Validate caller input before it reaches storage.
//! - Write through to the store on every mutation.
//! - Keep callers decoupled from the storage medium.

pub mod journal_service;
pub mod session_service;
