//! Query execution seam
//!
//! The engine never talks to a server directly. A driver implements
//! [`QueryExecutor`] and hands back raw, untyped result sets which the
//! row materializer turns into [`crate::Row`]s.

use crate::Result;

/// One raw result row: a nullable byte sequence per column
pub type RawRow = Vec<Option<Vec<u8>>>;

/// Raw result of a single query
pub struct RawResultSet<'a> {
    columns: Vec<String>,
    rows: Box<dyn Iterator<Item = Result<RawRow>> + 'a>,
}

impl<'a> RawResultSet<'a> {
    pub fn new(
        columns: Vec<String>,
        rows: impl Iterator<Item = Result<RawRow>> + 'a,
    ) -> Self {
        Self {
            columns,
            rows: Box::new(rows),
        }
    }

    /// Result set backed by rows that are already in memory
    pub fn from_rows(columns: Vec<String>, rows: Vec<RawRow>) -> RawResultSet<'static> {
        RawResultSet::new(columns, rows.into_iter().map(Ok))
    }

    /// Split into column names and the row cursor
    pub fn into_parts(
        self,
    ) -> (
        Vec<String>,
        Box<dyn Iterator<Item = Result<RawRow>> + 'a>,
    ) {
        (self.columns, self.rows)
    }
}

impl std::fmt::Debug for RawResultSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResultSet")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// Executes a single SQL statement and yields its raw rows.
///
/// Implementations run the statement synchronously. Any failure to run
/// the statement or to advance the cursor surfaces as
/// [`crate::DbCanonError::Query`].
pub trait QueryExecutor {
    fn query(&self, sql: &str) -> Result<RawResultSet<'_>>;
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    fn query(&self, sql: &str) -> Result<RawResultSet<'_>> {
        (**self).query(sql)
    }
}
