//! Rule content fetching with a TTL cache.
//!
//! The document store is an external collaborator behind a trait; fetch
//! failures are per-rule data (`FetchOutcome`), not exceptions, so a batch
//! always completes with whatever content was reachable.

mod cache;
mod fetcher;
mod store;

pub use cache::{CacheStats, Rule, RuleCache};
pub use fetcher::{FetchOutcome, RuleFetcher};
pub use store::{DocumentStore, FsDocumentStore};
