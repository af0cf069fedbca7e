//! Core types for Openstall.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod coverage;
pub mod id;

pub use coverage::Coverage;
pub use id::*;
