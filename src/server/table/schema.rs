//! Per-type table schemas and column resolution.

use crate::server::error::ValidationErrors;
use crate::server::table::column::ColumnDescriptor;

/// The declared column set of one object type's table.
///
/// Built once per type in a `LazyLock` and shared read-only; the displayed
/// column set of any table instance is always a subset of these.
pub struct TableSchema {
    /// Table identifier, e.g. `virtualization.cluster`. Also the key under
    /// which per-user column preferences are stored.
    pub name: &'static str,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    pub fn new(name: &'static str, columns: Vec<ColumnDescriptor>) -> Self {
        Self { name, columns }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Columns flagged as visible by default, in declaration order.
    pub fn default_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|column| column.default).collect()
    }

    /// Resolves the displayed column set.
    ///
    /// Order of precedence: explicit request override, then the user's
    /// stored preference, then the schema defaults. An explicitly requested
    /// unknown column is a validation error; a stale stored preference is
    /// dropped silently.
    pub fn resolve_columns(
        &self,
        requested: Option<&[String]>,
        stored: Option<&[String]>,
    ) -> Result<Vec<&ColumnDescriptor>, ValidationErrors> {
        if let Some(requested) = requested {
            let mut errors = ValidationErrors::new();
            let mut columns = Vec::with_capacity(requested.len());

            for name in requested {
                match self.column(name) {
                    Some(column) => columns.push(column),
                    None => errors.add("columns", format!("Unknown column: {name:?}")),
                }
            }

            return if errors.is_empty() {
                Ok(columns)
            } else {
                Err(errors)
            };
        }

        if let Some(stored) = stored {
            let columns: Vec<&ColumnDescriptor> =
                stored.iter().filter_map(|name| self.column(name)).collect();
            if !columns.is_empty() {
                return Ok(columns);
            }
        }

        Ok(self.default_columns())
    }
}

#[cfg(test)]
mod tests {
    use crate::server::table::column::ColumnDescriptor;

    use super::TableSchema;

    fn schema() -> TableSchema {
        TableSchema::new(
            "virtualization.cluster",
            vec![
                ColumnDescriptor::new("name", "Name", &["name"]).default_visible(),
                ColumnDescriptor::new("status", "Status", &["status"]).default_visible(),
                ColumnDescriptor::new("comments", "Comments", &["comments"]),
            ],
        )
    }

    fn names(columns: &[&ColumnDescriptor]) -> Vec<&'static str> {
        columns.iter().map(|column| column.name).collect()
    }

    #[test]
    fn falls_back_to_default_columns() {
        let schema = schema();
        let columns = schema.resolve_columns(None, None).unwrap();

        assert_eq!(names(&columns), vec!["name", "status"]);
    }

    #[test]
    fn stored_preference_wins_over_defaults() {
        let schema = schema();
        let stored = vec!["comments".to_string(), "name".to_string()];
        let columns = schema.resolve_columns(None, Some(&stored)).unwrap();

        assert_eq!(names(&columns), vec!["comments", "name"]);
    }

    #[test]
    fn request_override_wins_over_stored() {
        let schema = schema();
        let stored = vec!["comments".to_string()];
        let requested = vec!["status".to_string()];
        let columns = schema
            .resolve_columns(Some(&requested), Some(&stored))
            .unwrap();

        assert_eq!(names(&columns), vec!["status"]);
    }

    #[test]
    fn unknown_requested_column_is_rejected() {
        let schema = schema();
        let requested = vec!["flux".to_string()];
        let errors = schema.resolve_columns(Some(&requested), None).unwrap_err();

        assert!(errors.errors["columns"][0].contains("flux"));
    }

    #[test]
    fn stale_stored_preference_is_dropped() {
        let schema = schema();
        let stored = vec!["gone".to_string(), "name".to_string()];
        let columns = schema.resolve_columns(None, Some(&stored)).unwrap();

        assert_eq!(names(&columns), vec!["name"]);
    }
}
