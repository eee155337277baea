//! SQLite-backed memory substrate for the Bino agent.
//!
//! Holds the append-only fact store (the memory bank) and the post
//! history. The backing schema is an implementation detail of this crate;
//! callers only see the contracts on [`FactStore`].

pub mod migration;
pub mod store;

pub use store::FactStore;
