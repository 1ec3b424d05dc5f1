//! Language model access port trait.
//!
//! The live model is non-deterministic; putting it behind this trait lets the
//! prompt compiler and decision parser be exercised with canned text.

use crate::domain::error::AdvisorError;

pub trait ModelPort {
    /// One best-effort completion for the prompt pair. No retry here; a
    /// failure surfaces as an errored decision run.
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AdvisorError>;
}
