//! dbcanon core - schema introspection and canonicalization
//!
//! Turns one MySQL database into a canonical, environment-independent
//! representation that can be compared with another instance:
//!
//! - `classify` - declared column type to semantic category
//! - `materialize` - raw result bytes to typed [`Row`]s
//! - `canonical` - strips session-specific clauses from `SHOW CREATE` output
//! - `SchemaExtractor` - listing, scripts, comments and catalog-wide maps
//!
//! Query execution is delegated to a [`QueryExecutor`] supplied by a driver.

pub mod canonical;
pub mod classify;
mod error;
pub mod escape;
mod executor;
mod extractor;
mod filter;
mod kind;
pub mod materialize;
mod resolver;
mod snapshot;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use canonical::canonicalize;
pub use classify::{ColumnTypeCategory, classify};
pub use error::*;
pub use executor::*;
pub use extractor::SchemaExtractor;
pub use filter::NameFilter;
pub use kind::*;
pub use materialize::{fetch_rows, materialize};
pub use resolver::*;
pub use snapshot::*;
pub use types::*;
