//! Shared types for the Bino posting agent.
//!
//! Defines the data model, error type, and configuration used across the
//! memory substrate, drafting pipeline, and CLI. It contains no business
//! logic.

pub mod config;
pub mod error;
pub mod record;
pub mod snapshot;
