//! In-memory executor for unit tests

use std::cell::RefCell;
use std::collections::HashMap;

use crate::executor::{QueryExecutor, RawResultSet, RawRow};
use crate::{DbCanonError, Result};

#[derive(Clone)]
struct Canned {
    columns: Vec<String>,
    rows: Vec<RawRow>,
    cursor_error: Option<String>,
}

/// Answers queries from canned result sets keyed by exact SQL text and
/// records every statement it receives.
#[derive(Default)]
pub struct FakeExecutor {
    results: HashMap<String, Canned>,
    failures: HashMap<String, String>,
    issued: RefCell<Vec<String>>,
}

fn to_raw(rows: Vec<Vec<Option<&str>>>) -> Vec<RawRow> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|v| v.map(|s| s.as_bytes().to_vec()))
                .collect()
        })
        .collect()
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(
        mut self,
        sql: &str,
        columns: &[&str],
        rows: Vec<Vec<Option<&str>>>,
    ) -> Self {
        self.results.insert(
            sql.to_string(),
            Canned {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows: to_raw(rows),
                cursor_error: None,
            },
        );
        self
    }

    /// Yields `rows` and then fails the cursor with `message`
    pub fn with_cursor_error(
        mut self,
        sql: &str,
        columns: &[&str],
        rows: Vec<Vec<Option<&str>>>,
        message: &str,
    ) -> Self {
        self.results.insert(
            sql.to_string(),
            Canned {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows: to_raw(rows),
                cursor_error: Some(message.to_string()),
            },
        );
        self
    }

    /// Fails the statement itself with `message`
    pub fn with_failure(mut self, sql: &str, message: &str) -> Self {
        self.failures.insert(sql.to_string(), message.to_string());
        self
    }

    pub fn issued(&self) -> Vec<String> {
        self.issued.borrow().clone()
    }
}

impl QueryExecutor for FakeExecutor {
    fn query(&self, sql: &str) -> Result<RawResultSet<'_>> {
        self.issued.borrow_mut().push(sql.to_string());

        if let Some(message) = self.failures.get(sql) {
            return Err(DbCanonError::Query(message.clone()));
        }

        let canned = self
            .results
            .get(sql)
            .cloned()
            .ok_or_else(|| DbCanonError::Query(format!("unexpected query: {}", sql)))?;

        let trailing = canned
            .cursor_error
            .map(|message| Err(DbCanonError::Query(message)));
        let rows = canned.rows.into_iter().map(Ok).chain(trailing);
        Ok(RawResultSet::new(canned.columns, rows))
    }
}
