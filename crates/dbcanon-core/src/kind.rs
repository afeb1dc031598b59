//! Object kinds and their per-kind query descriptors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::escape::{mysql_escape, quote_identifier};
use crate::{DbCanonError, Row};

/// Kind of schema object that can be listed and scripted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Table,
    View,
    Function,
    Procedure,
    Trigger,
}

/// Where a listing row keeps the object name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    /// Positional field (SHOW FULL TABLES names its first column after the database)
    Position(usize),
    Named(&'static str),
}

/// Status query used to read an object's comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusQuery {
    /// `SHOW TABLE STATUS WHERE Name='...'`
    TableStatus,
    /// `SHOW <keyword> STATUS WHERE Db = DATABASE() AND Name='...'`
    RoutineStatus(&'static str),
}

/// Everything the extractor needs to know about one object kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDescriptor {
    pub listing_query: &'static str,
    pub name_field: NameField,
    /// Keyword after `SHOW CREATE`
    pub show_create_keyword: &'static str,
    /// Result field holding the definition
    pub script_field: &'static str,
    /// `None` for kinds without a comment
    pub status_query: Option<StatusQuery>,
}

const TABLE: KindDescriptor = KindDescriptor {
    listing_query: "SHOW FULL TABLES WHERE TABLE_TYPE NOT LIKE 'VIEW'",
    name_field: NameField::Position(0),
    show_create_keyword: "TABLE",
    script_field: "Create Table",
    status_query: Some(StatusQuery::TableStatus),
};

const VIEW: KindDescriptor = KindDescriptor {
    listing_query: "SHOW FULL TABLES WHERE TABLE_TYPE LIKE 'VIEW'",
    name_field: NameField::Position(0),
    show_create_keyword: "VIEW",
    script_field: "Create View",
    status_query: None,
};

const FUNCTION: KindDescriptor = KindDescriptor {
    listing_query: "SHOW FUNCTION STATUS WHERE Db = DATABASE()",
    name_field: NameField::Named("Name"),
    show_create_keyword: "FUNCTION",
    script_field: "Create Function",
    status_query: Some(StatusQuery::RoutineStatus("FUNCTION")),
};

const PROCEDURE: KindDescriptor = KindDescriptor {
    listing_query: "SHOW PROCEDURE STATUS WHERE Db = DATABASE()",
    name_field: NameField::Named("Name"),
    show_create_keyword: "PROCEDURE",
    script_field: "Create Procedure",
    status_query: Some(StatusQuery::RoutineStatus("PROCEDURE")),
};

const TRIGGER: KindDescriptor = KindDescriptor {
    listing_query: "SHOW TRIGGERS",
    name_field: NameField::Named("Trigger"),
    show_create_keyword: "TRIGGER",
    script_field: "SQL Original Statement",
    status_query: None,
};

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Table,
        ObjectKind::View,
        ObjectKind::Function,
        ObjectKind::Procedure,
        ObjectKind::Trigger,
    ];

    pub fn descriptor(self) -> &'static KindDescriptor {
        match self {
            ObjectKind::Table => &TABLE,
            ObjectKind::View => &VIEW,
            ObjectKind::Function => &FUNCTION,
            ObjectKind::Procedure => &PROCEDURE,
            ObjectKind::Trigger => &TRIGGER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::View => "view",
            ObjectKind::Function => "function",
            ObjectKind::Procedure => "procedure",
            ObjectKind::Trigger => "trigger",
        }
    }

    pub fn has_comment(self) -> bool {
        self.descriptor().status_query.is_some()
    }

    /// `SHOW CREATE <KIND> <name>` with the name backtick-quoted
    pub fn show_create_query(self, name: &str) -> String {
        format!(
            "SHOW CREATE {} {}",
            self.descriptor().show_create_keyword,
            quote_identifier(name)
        )
    }

    /// Comment status query for `name`, `None` for kinds without comments
    pub fn status_query(self, name: &str) -> Option<String> {
        let name = mysql_escape(name.as_bytes());
        self.descriptor().status_query.map(|status| match status {
            StatusQuery::TableStatus => format!("SHOW TABLE STATUS WHERE Name='{}'", name),
            StatusQuery::RoutineStatus(keyword) => format!(
                "SHOW {} STATUS WHERE Db = DATABASE() AND Name='{}'",
                keyword, name
            ),
        })
    }

    /// Read the object name out of a listing row
    pub fn listed_name(self, row: &Row) -> Option<&str> {
        let value = match self.descriptor().name_field {
            NameField::Position(idx) => row.get(idx),
            NameField::Named(field) => row.get_by_name(field),
        };
        value.and_then(|v| v.as_str())
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = DbCanonError;

    /// Accepts singular or plural names in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let singular = lowered.strip_suffix('s').unwrap_or(&lowered);
        ObjectKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == singular)
            .ok_or_else(|| DbCanonError::UnknownObjectKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_names() {
        assert_eq!("table".parse::<ObjectKind>().unwrap(), ObjectKind::Table);
        assert_eq!("Views".parse::<ObjectKind>().unwrap(), ObjectKind::View);
        assert_eq!(
            "PROCEDURE".parse::<ObjectKind>().unwrap(),
            ObjectKind::Procedure
        );
        assert_eq!(" triggers ".parse::<ObjectKind>().unwrap(), ObjectKind::Trigger);
    }

    #[test]
    fn test_unknown_kind_fails_before_query() {
        let err = "sequence".parse::<ObjectKind>().unwrap_err();
        assert!(matches!(err, DbCanonError::UnknownObjectKind(ref k) if k == "sequence"));
        assert!("".parse::<ObjectKind>().is_err());
    }

    #[test]
    fn test_show_create_queries() {
        assert_eq!(
            ObjectKind::Table.show_create_query("users"),
            "SHOW CREATE TABLE `users`"
        );
        assert_eq!(
            ObjectKind::Trigger.show_create_query("trg_x"),
            "SHOW CREATE TRIGGER `trg_x`"
        );
        assert_eq!(
            ObjectKind::Table.show_create_query("order"),
            "SHOW CREATE TABLE `order`"
        );
        assert_eq!(
            ObjectKind::View.show_create_query("odd`name"),
            "SHOW CREATE VIEW `odd``name`"
        );
    }

    #[test]
    fn test_status_queries() {
        assert_eq!(
            ObjectKind::Table.status_query("users").as_deref(),
            Some("SHOW TABLE STATUS WHERE Name='users'")
        );
        assert_eq!(
            ObjectKind::Function.status_query("f'x").as_deref(),
            Some("SHOW FUNCTION STATUS WHERE Db = DATABASE() AND Name='f\\'x'")
        );
        assert_eq!(ObjectKind::View.status_query("v"), None);
        assert_eq!(ObjectKind::Trigger.status_query("t"), None);
    }

    #[test]
    fn test_comment_capability() {
        assert!(ObjectKind::Table.has_comment());
        assert!(ObjectKind::Procedure.has_comment());
        assert!(!ObjectKind::View.has_comment());
        assert!(!ObjectKind::Trigger.has_comment());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in ObjectKind::ALL {
            assert_eq!(kind.to_string().parse::<ObjectKind>().unwrap(), kind);
        }
    }
}
