//! Catalog-wide snapshot of canonical scripts

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{NameFilter, ObjectKind, ScriptMap, TableMap};

/// Comma-separated include/exclude lists for one object kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindFilter {
    pub include: String,
    pub exclude: String,
}

impl KindFilter {
    pub fn new(include: impl Into<String>, exclude: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            exclude: exclude.into(),
        }
    }

    pub fn name_filter(&self) -> NameFilter {
        NameFilter::new(&self.include, &self.exclude)
    }
}

/// Filters for every object kind. Kinds listed in `skip` are not extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotFilters {
    pub table: KindFilter,
    pub view: KindFilter,
    pub function: KindFilter,
    pub procedure: KindFilter,
    pub trigger: KindFilter,
    pub skip: Vec<ObjectKind>,
}

impl SnapshotFilters {
    pub fn for_kind(&self, kind: ObjectKind) -> &KindFilter {
        match kind {
            ObjectKind::Table => &self.table,
            ObjectKind::View => &self.view,
            ObjectKind::Function => &self.function,
            ObjectKind::Procedure => &self.procedure,
            ObjectKind::Trigger => &self.trigger,
        }
    }

    pub fn includes_kind(&self, kind: ObjectKind) -> bool {
        !self.skip.contains(&kind)
    }
}

/// Canonical scripts and comments for one object kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindSnapshot {
    pub scripts: ScriptMap,
    /// Only objects with a non-empty comment
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub comments: IndexMap<String, String>,
}

/// Canonical representation of one schema, comparable across servers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub objects: IndexMap<ObjectKind, KindSnapshot>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tables: TableMap,
}

impl SchemaSnapshot {
    pub fn scripts(&self, kind: ObjectKind) -> Option<&ScriptMap> {
        self.objects.get(&kind).map(|k| &k.scripts)
    }

    pub fn object_count(&self) -> usize {
        self.objects.values().map(|k| k.scripts.len()).sum()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
