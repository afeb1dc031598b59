//! Table structure resolution

use crate::escape::quote_identifier;
use crate::executor::QueryExecutor;
use crate::materialize::fetch_rows;
use crate::{ColumnMeta, DbCanonError, Result, TableStructure};

/// Resolves the column structure of a named table
pub trait TableStructureResolver {
    fn resolve_table_structure(&self, name: &str) -> Result<TableStructure>;
}

/// Resolver backed by `SHOW FULL COLUMNS FROM <table>`
pub struct ShowColumnsResolver<E> {
    executor: E,
}

impl<E: QueryExecutor> ShowColumnsResolver<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E: QueryExecutor> TableStructureResolver for ShowColumnsResolver<E> {
    #[tracing::instrument(skip(self))]
    fn resolve_table_structure(&self, name: &str) -> Result<TableStructure> {
        let query = format!("SHOW FULL COLUMNS FROM {}", quote_identifier(name));
        let rows = fetch_rows(&self.executor, name, &query, None)?;
        if rows.is_empty() {
            return Err(DbCanonError::NotFound(format!("no columns for table '{}'", name)));
        }

        let columns = rows
            .iter()
            .map(|row| {
                let field = row.str_by_name("Field").ok_or_else(|| {
                    DbCanonError::Schema(format!("column listing for '{}' has no Field", name))
                })?;
                let data_type = row.str_by_name("Type").ok_or_else(|| {
                    DbCanonError::Schema(format!(
                        "column '{}' of '{}' has no Type",
                        field, name
                    ))
                })?;

                Ok(ColumnMeta {
                    name: field.to_string(),
                    data_type: data_type.to_string(),
                    nullable: row.str_by_name("Null") == Some("YES"),
                    key: row.str_by_name("Key").unwrap_or_default().to_string(),
                    default_value: row.str_by_name("Default").map(str::to_string),
                    extra: row.str_by_name("Extra").unwrap_or_default().to_string(),
                    comment: row.str_by_name("Comment").unwrap_or_default().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(table = name, column_count = columns.len(), "table structure resolved");
        Ok(TableStructure {
            name: name.to_string(),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeExecutor;
    use pretty_assertions::assert_eq;

    const COLUMNS: &[&str] = &[
        "Field",
        "Type",
        "Collation",
        "Null",
        "Key",
        "Default",
        "Extra",
        "Privileges",
        "Comment",
    ];

    #[test]
    fn test_resolves_columns_in_order() {
        let executor = FakeExecutor::new().with_result(
            "SHOW FULL COLUMNS FROM `users`",
            COLUMNS,
            vec![
                vec![
                    Some("id"),
                    Some("int(11)"),
                    None,
                    Some("NO"),
                    Some("PRI"),
                    None,
                    Some("auto_increment"),
                    Some("select"),
                    Some(""),
                ],
                vec![
                    Some("email"),
                    Some("varchar(255)"),
                    Some("utf8mb4_general_ci"),
                    Some("YES"),
                    Some(""),
                    Some("none@example.com"),
                    Some(""),
                    Some("select"),
                    Some("login"),
                ],
            ],
        );
        let resolver = ShowColumnsResolver::new(&executor);
        let table = resolver.resolve_table_structure("users").unwrap();

        assert_eq!(table.name, "users");
        assert_eq!(
            table.columns,
            vec![
                ColumnMeta {
                    name: "id".into(),
                    data_type: "int(11)".into(),
                    nullable: false,
                    key: "PRI".into(),
                    default_value: None,
                    extra: "auto_increment".into(),
                    comment: String::new(),
                },
                ColumnMeta {
                    name: "email".into(),
                    data_type: "varchar(255)".into(),
                    nullable: true,
                    key: String::new(),
                    default_value: Some("none@example.com".into()),
                    extra: String::new(),
                    comment: "login".into(),
                },
            ]
        );
        assert_eq!(table.column_map()["email"].data_type, "varchar(255)");
    }

    #[test]
    fn test_missing_table_is_error() {
        let executor = FakeExecutor::new()
            .with_failure("SHOW FULL COLUMNS FROM `gone`", "Table 'app.gone' doesn't exist");
        let resolver = ShowColumnsResolver::new(&executor);
        assert!(matches!(
            resolver.resolve_table_structure("gone"),
            Err(DbCanonError::Query(_))
        ));
    }
}
