//! Common constants for the typemap crates.
//!
//! This crate provides values shared between the solver and the facade:
//! - Recursion depth ceilings for relation and validation queries
//! - Runtime sampling bounds for container validation

// Centralized limits and thresholds
pub mod limits;
