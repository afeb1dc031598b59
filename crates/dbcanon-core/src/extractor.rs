//! Object enumeration, script extraction and catalog aggregation

use crate::canonical::canonicalize;
use crate::escape::quote_identifier;
use crate::executor::QueryExecutor;
use crate::materialize::fetch_rows;
use crate::snapshot::{KindSnapshot, SchemaSnapshot, SnapshotFilters};
use crate::{
    DbCanonError, NameFilter, ObjectKind, Result, Row, ScriptMap, TableMap, TableStructure,
    TableStructureResolver,
};

/// Label used for rows of catalog-level queries
const CATALOG_LABEL: &str = "DATABASE";

/// Extracts object names, canonical scripts and comments from one database.
///
/// Every call re-queries the server; nothing is cached between calls.
pub struct SchemaExtractor<E> {
    executor: E,
}

impl<E: QueryExecutor> SchemaExtractor<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// List the names of all objects of `kind` that pass the include and
    /// exclude lists, in the order the server returns them.
    #[tracing::instrument(skip(self))]
    pub fn list_objects(&self, kind: ObjectKind, include: &str, exclude: &str) -> Result<Vec<String>> {
        self.list_filtered(kind, &NameFilter::new(include, exclude))
    }

    fn list_filtered(&self, kind: ObjectKind, filter: &NameFilter) -> Result<Vec<String>> {
        let rows = fetch_rows(
            &self.executor,
            CATALOG_LABEL,
            kind.descriptor().listing_query,
            None,
        )?;

        let mut names = Vec::new();
        for row in &rows {
            let name = kind.listed_name(row).ok_or_else(|| {
                DbCanonError::Schema(format!("{} listing row has no name field", kind))
            })?;
            if filter.matches(name) {
                names.push(name.to_string());
            }
        }

        tracing::debug!(%kind, listed = rows.len(), kept = names.len(), "objects listed");
        Ok(names)
    }

    /// Canonical definition script of one object.
    ///
    /// Fails with [`DbCanonError::NotFound`] when `SHOW CREATE` returns no row.
    #[tracing::instrument(skip(self))]
    pub fn get_script(&self, kind: ObjectKind, name: &str) -> Result<String> {
        let query = kind.show_create_query(name);
        let rows = fetch_rows(&self.executor, name, &query, None)?;
        let row = rows
            .first()
            .ok_or_else(|| DbCanonError::NotFound(format!("{} '{}' not found", kind, name)))?;

        let field = kind.descriptor().script_field;
        let script = row.str_by_name(field).ok_or_else(|| {
            DbCanonError::Schema(format!("{} returned no '{}' field", query, field))
        })?;

        Ok(canonicalize(script))
    }

    /// Comment of one object, empty when the kind has none or it cannot be read.
    #[tracing::instrument(skip(self))]
    pub fn get_comment(&self, kind: ObjectKind, name: &str) -> String {
        let Some(query) = kind.status_query(name) else {
            return String::new();
        };

        match fetch_rows(&self.executor, name, &query, None) {
            Ok(rows) => rows
                .first()
                .and_then(|row| row.str_by_name("Comment"))
                .map(str::to_string)
                .unwrap_or_default(),
            Err(e) => {
                tracing::debug!(%kind, name, error = %e, "comment lookup failed");
                String::new()
            }
        }
    }

    /// Canonical scripts for every listed object of `kind`.
    ///
    /// The first failing object aborts the whole list.
    #[tracing::instrument(skip(self))]
    pub fn get_script_list(&self, kind: ObjectKind, include: &str, exclude: &str) -> Result<ScriptMap> {
        let names = self.list_objects(kind, include, exclude)?;
        self.scripts_for(kind, names)
    }

    fn scripts_for(&self, kind: ObjectKind, names: Vec<String>) -> Result<ScriptMap> {
        let mut scripts = ScriptMap::with_capacity(names.len());
        for name in names {
            let script = self.get_script(kind, &name)?;
            scripts.insert(name, script);
        }
        Ok(scripts)
    }

    /// Structure of every listed table, resolved through `resolver`.
    ///
    /// The first table that cannot be resolved aborts the whole list.
    #[tracing::instrument(skip(self, resolver))]
    pub fn get_table_list<R: TableStructureResolver + ?Sized>(
        &self,
        resolver: &R,
        include: &str,
        exclude: &str,
    ) -> Result<TableMap> {
        let names = self.list_objects(ObjectKind::Table, include, exclude)?;
        self.tables_for(resolver, names)
    }

    fn tables_for<R: TableStructureResolver + ?Sized>(
        &self,
        resolver: &R,
        names: Vec<String>,
    ) -> Result<TableMap> {
        let mut tables = TableMap::with_capacity(names.len());
        for name in names {
            let table = resolver.resolve_table_structure(&name)?;
            tables.insert(name, table);
        }
        Ok(tables)
    }

    /// All rows of a table, typed by the table's declared column types
    #[tracing::instrument(skip(self, table), fields(table = %table.name))]
    pub fn get_table_rows(&self, table: &TableStructure) -> Result<Vec<Row>> {
        let query = format!("SELECT * FROM {}", quote_identifier(&table.name));
        let columns = table.column_map();
        fetch_rows(&self.executor, &table.name, &query, Some(&columns))
    }

    /// Scripts and comments for every kind not skipped by `filters`, plus
    /// table structures when a resolver is supplied.
    #[tracing::instrument(skip(self, filters, resolver))]
    pub fn snapshot(
        &self,
        filters: &SnapshotFilters,
        resolver: Option<&dyn TableStructureResolver>,
    ) -> Result<SchemaSnapshot> {
        let mut snapshot = SchemaSnapshot::default();

        for kind in ObjectKind::ALL {
            if !filters.includes_kind(kind) {
                continue;
            }
            let names = self.list_filtered(kind, &filters.for_kind(kind).name_filter())?;

            let mut entry = KindSnapshot::default();
            if kind.has_comment() {
                for name in &names {
                    let comment = self.get_comment(kind, name);
                    if !comment.is_empty() {
                        entry.comments.insert(name.clone(), comment);
                    }
                }
            }

            if kind == ObjectKind::Table {
                if let Some(resolver) = resolver {
                    snapshot.tables = self.tables_for(resolver, names.clone())?;
                }
            }

            entry.scripts = self.scripts_for(kind, names)?;
            snapshot.objects.insert(kind, entry);
        }

        tracing::info!(objects = snapshot.object_count(), "schema snapshot complete");
        Ok(snapshot)
    }
}
