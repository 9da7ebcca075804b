// model = "claude-opus-4-5"
// created = 2026-02-03
// modified = 2026-02-03
// driver = "Isaac Clayton"

//! Shared primitives for the integration algorithms.
//!
//! The algorithms differ only in their placement rules; the bookkeeping
//! underneath them is common:
//!
//! - `Id`: globally unique `(agent, seq)` item identifiers
//! - `Version`: per-agent highest-seq vector used for causal readiness
//!   and membership checks

pub mod id;
pub mod version;

pub use id::Id;
pub use version::is_in_version;
pub use version::Version;
