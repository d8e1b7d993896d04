//! Calendar-to-cycle mapping
//!
//! This module handles cycle tables, holiday classification, schedule
//! resolution, and the configuration that drives them.

pub mod config;
pub mod error;
pub mod holiday;
pub mod resolver;
pub mod table;
