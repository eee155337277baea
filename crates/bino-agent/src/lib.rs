//! Core drafting pipeline for the Bino posting agent.
//!
//! Grounds a persona draft in the memory bank and the latest market
//! snapshot, then normalizes the generated text to the hard formatting
//! rules before it is persisted or published. Scraping and publishing are
//! external collaborators reached through the [`snapshot::SnapshotRefresher`]
//! and [`publish::Publisher`] traits.

pub mod driver;
pub mod grounding;
pub mod pipeline;
pub mod prompt;
pub mod publish;
pub mod snapshot;
pub mod style;

pub use pipeline::PostPipeline;
