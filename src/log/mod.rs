//! Logging and observability
//!
//! This module provides logging functionality for the timetable tool,
//! including JSONL logging of generation runs.

pub mod jsonl;

pub use jsonl::{GenerationOutcome, JsonlLogger};
