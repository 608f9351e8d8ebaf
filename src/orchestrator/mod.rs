//! Pipeline orchestration.
//!
//! Sequences detection → classification → intent → selection → fetch →
//! formatting for one request, measuring per-stage latency. Every failure
//! is absorbed at this boundary: the caller always gets a `LoadOutcome`,
//! possibly with nothing to inject.

mod engine;
mod format;

pub use engine::{LoadMetadata, LoadOutcome, RulesEngine, StageTimings};
pub use format::format_injection;
