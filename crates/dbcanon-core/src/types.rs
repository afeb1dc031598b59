//! Core types for dbcanon

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A materialized column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// Signed integer (all MySQL integer widths)
    Int64(i64),
    /// Floating point (float, double and decimal)
    Float64(f64),
    /// Text, escaped for character columns
    String(String),
    /// Binary data, unconverted
    Bytes(Vec<u8>),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

/// A materialized result row.
///
/// Values are position-aligned with the originating result set; the
/// name index resolves a column name to its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    column_index: HashMap<String, usize>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(column_index: HashMap<String, usize>, values: Vec<Value>) -> Self {
        Self {
            column_index,
            values,
        }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.column_index
            .get(name)
            .and_then(|idx| self.values.get(*idx))
    }

    /// Get a text value by column name, `None` for NULL or non-text values
    pub fn str_by_name(&self, name: &str) -> Option<&str> {
        self.get_by_name(name).and_then(Value::as_str)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of a column by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }
}

/// Column metadata used to type raw values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ColumnMeta {
    /// Column name
    pub name: String,
    /// Declared type as reported by the server, lower-case (e.g. `int(11)`)
    pub data_type: String,
    #[serde(default)]
    pub nullable: bool,
    /// Key marker (`PRI`, `UNI`, `MUL` or empty)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Extra attributes such as `auto_increment`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub extra: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }
}

/// Column metadata keyed by column name
pub type ColumnMap = HashMap<String, ColumnMeta>;

/// Structure of a single table as resolved by a [`crate::TableStructureResolver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStructure {
    pub name: String,
    /// Columns in ordinal order
    pub columns: Vec<ColumnMeta>,
}

impl TableStructure {
    /// Metadata map used by the row materializer
    pub fn column_map(&self) -> ColumnMap {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.clone()))
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Object name to canonical script, in listing order
pub type ScriptMap = IndexMap<String, String>;

/// Table name to structure, in listing order
pub type TableMap = IndexMap<String, TableStructure>;
