//! Rule catalog: the load-once registry of candidate rules.
//!
//! Entries are declarative metadata validated at load time; the catalog is
//! immutable shared state after load. Reloading builds a fresh catalog and
//! atomically swaps the shared reference.

mod loader;
mod types;

pub use loader::load_catalog;
pub use types::{Catalog, CatalogHandle, RuleCategory, RuleInfo};
