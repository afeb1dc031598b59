//! Row materialization: raw result bytes to typed values

use std::collections::HashMap;

use crate::classify::{ColumnTypeCategory, classify};
use crate::escape::mysql_escape;
use crate::executor::{QueryExecutor, RawRow};
use crate::{ColumnMap, DbCanonError, Result, Row, Value};

/// Build the name to position index for a result set. The first occurrence
/// of a duplicated name wins.
fn column_index(column_names: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(column_names.len());
    for (position, name) in column_names.iter().enumerate() {
        index.entry(name.clone()).or_insert(position);
    }
    index
}

/// Convert one raw result row into a [`Row`].
///
/// Without column metadata every non-NULL value is decoded as text. With
/// metadata each value is typed by the category of its declared type; an
/// unclassifiable type fails with [`DbCanonError::Classification`] naming
/// `table`, the column and the declared type.
pub fn materialize(
    table: &str,
    column_names: &[String],
    raw_values: RawRow,
    columns: Option<&ColumnMap>,
) -> Result<Row> {
    materialize_indexed(table, column_names, column_index(column_names), raw_values, columns)
}

fn materialize_indexed(
    table: &str,
    column_names: &[String],
    index: HashMap<String, usize>,
    raw_values: RawRow,
    columns: Option<&ColumnMap>,
) -> Result<Row> {
    if raw_values.len() != column_names.len() {
        return Err(DbCanonError::Query(format!(
            "row has {} values for {} columns",
            raw_values.len(),
            column_names.len()
        )));
    }

    let values = raw_values
        .into_iter()
        .zip(column_names)
        .map(|(raw, name)| match (raw, columns) {
            (None, _) => Ok(Value::Null),
            (Some(bytes), None) => Ok(Value::String(decode_text(bytes))),
            (Some(bytes), Some(columns)) => {
                let data_type = columns
                    .get(name)
                    .map(|c| c.data_type.as_str())
                    .unwrap_or_default();
                convert_typed(table, name, data_type, bytes)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Row::new(index, values))
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn convert_typed(table: &str, column: &str, data_type: &str, bytes: Vec<u8>) -> Result<Value> {
    match classify(data_type) {
        ColumnTypeCategory::Integer => {
            let text = String::from_utf8_lossy(&bytes);
            Ok(Value::Int64(text.parse::<i64>().unwrap_or_else(|_| {
                tracing::trace!(table, column, value = %text, "integer parse failed, using 0");
                0
            })))
        }
        ColumnTypeCategory::Float => {
            let text = String::from_utf8_lossy(&bytes);
            Ok(Value::Float64(text.parse::<f64>().unwrap_or_else(|_| {
                tracing::trace!(table, column, value = %text, "float parse failed, using 0");
                0.0
            })))
        }
        ColumnTypeCategory::Character => Ok(Value::String(mysql_escape(&bytes))),
        ColumnTypeCategory::Temporal => Ok(Value::String(decode_text(bytes))),
        ColumnTypeCategory::Binary => Ok(Value::Bytes(bytes)),
        ColumnTypeCategory::Unknown => {
            tracing::warn!(table, column, data_type, "unrecognized column type");
            Err(DbCanonError::classification(table, column, data_type))
        }
    }
}

/// Run `sql` and materialize every row in result order.
///
/// `table` only labels classification errors. Cursor errors are returned
/// as the executor reported them.
pub fn fetch_rows<E: QueryExecutor + ?Sized>(
    executor: &E,
    table: &str,
    sql: &str,
    columns: Option<&ColumnMap>,
) -> Result<Vec<Row>> {
    let result = executor.query(sql)?;
    let (column_names, cursor) = result.into_parts();
    let index = column_index(&column_names);

    let mut rows = Vec::new();
    for raw in cursor {
        let raw = raw?;
        rows.push(materialize_indexed(
            table,
            &column_names,
            index.clone(),
            raw,
            columns,
        )?);
    }

    tracing::debug!(table, row_count = rows.len(), "rows materialized");
    Ok(rows)
}
