//! Declared column type classification

use serde::{Deserialize, Serialize};

/// Semantic category of a declared column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnTypeCategory {
    Integer,
    Float,
    Character,
    Binary,
    Temporal,
    Unknown,
}

const INTEGER_PREFIXES: &[&str] = &["tinyint", "smallint", "mediumint", "int", "bigint"];
const FLOAT_PREFIXES: &[&str] = &["float", "double", "decimal"];
const CHARACTER_PREFIXES: &[&str] = &[
    "char",
    "varchar",
    "text",
    "tinytext",
    "mediumtext",
    "longtext",
    "json",
];
const BINARY_PREFIXES: &[&str] = &["tinyblob", "blob", "mediumblob", "longblob"];
const TEMPORAL_PREFIXES: &[&str] = &["date", "datetime", "timestamp"];

const CATEGORIES: &[(ColumnTypeCategory, &[&str])] = &[
    (ColumnTypeCategory::Integer, INTEGER_PREFIXES),
    (ColumnTypeCategory::Float, FLOAT_PREFIXES),
    (ColumnTypeCategory::Character, CHARACTER_PREFIXES),
    (ColumnTypeCategory::Binary, BINARY_PREFIXES),
    (ColumnTypeCategory::Temporal, TEMPORAL_PREFIXES),
];

/// Classify a declared column type by case-sensitive prefix.
///
/// Callers pass the type as the server reports it in lower case
/// (`int(11) unsigned`, `varchar(255)`). Anything unmatched is
/// [`ColumnTypeCategory::Unknown`].
pub fn classify(declared_type: &str) -> ColumnTypeCategory {
    CATEGORIES
        .iter()
        .find(|(_, prefixes)| prefixes.iter().any(|p| declared_type.starts_with(p)))
        .map(|(category, _)| *category)
        .unwrap_or(ColumnTypeCategory::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_prefix_classifies() {
        for (category, prefixes) in CATEGORIES {
            for prefix in *prefixes {
                assert_eq!(classify(prefix), *category, "prefix {}", prefix);
            }
        }
    }

    #[test]
    fn test_declared_types_with_modifiers() {
        assert_eq!(classify("int(11)"), ColumnTypeCategory::Integer);
        assert_eq!(classify("bigint(20) unsigned"), ColumnTypeCategory::Integer);
        assert_eq!(classify("decimal(10,2)"), ColumnTypeCategory::Float);
        assert_eq!(classify("varchar(255)"), ColumnTypeCategory::Character);
        assert_eq!(classify("longblob"), ColumnTypeCategory::Binary);
        assert_eq!(classify("datetime(6)"), ColumnTypeCategory::Temporal);
        assert_eq!(classify("timestamp"), ColumnTypeCategory::Temporal);
    }

    #[test]
    fn test_unmatched_types_are_unknown() {
        assert_eq!(classify("enum('a','b')"), ColumnTypeCategory::Unknown);
        assert_eq!(classify("geometry"), ColumnTypeCategory::Unknown);
        assert_eq!(classify("bit(1)"), ColumnTypeCategory::Unknown);
        assert_eq!(classify(""), ColumnTypeCategory::Unknown);
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        assert_eq!(classify("INT(11)"), ColumnTypeCategory::Unknown);
        assert_eq!(classify("VarChar(10)"), ColumnTypeCategory::Unknown);
    }
}
