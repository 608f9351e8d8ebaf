//! Project context detection.
//!
//! Inspects a working directory for marker files and dependency manifests
//! and produces a `ProjectContext`: languages, frameworks, cloud providers,
//! maturity level, and an informational confidence score. Detection never
//! fails: unreadable files are skipped and unmatched categories stay empty.

mod detector;
mod markers;
mod types;

pub use detector::ContextDetector;
pub use types::{Maturity, ProjectContext};
