//! Per-request table instances.
//!
//! A [`Table`] binds the shared schema to one record collection and one
//! user's column selection, then sorts, paginates, and renders rows.

use std::cmp::Ordering;

use serde_json::Value;

use crate::model::api::{CellDto, ColumnDto, PageDto, RowActionDto, RowDto, TableDto};
use crate::server::error::ValidationErrors;
use crate::server::model::principal::Principal;
use crate::server::table::column::{access, CellKind, ColumnDescriptor, EMPTY_PLACEHOLDER};
use crate::server::table::schema::TableSchema;

pub static DEFAULT_PER_PAGE: u64 = 50;
pub static MAX_PER_PAGE: u64 = 1000;

/// One requested sort column, leftmost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

/// Parses sort tokens of the form `name` / `-name`.
pub fn parse_sort(tokens: &[String]) -> Vec<SortKey> {
    tokens
        .iter()
        .filter(|token| !token.is_empty())
        .map(|token| match token.strip_prefix('-') {
            Some(name) => SortKey {
                column: name.to_string(),
                descending: true,
            },
            None => SortKey {
                column: token.clone(),
                descending: false,
            },
        })
        .collect()
}

/// Everything row rendering needs besides the records themselves.
pub struct RenderContext<'a> {
    pub principal: &'a Principal,
    /// URL path prefix of the object type, e.g. `virtualization/cluster`.
    pub object_path: String,
    pub change_permission: String,
    pub delete_permission: String,
}

pub struct Table<'a> {
    schema: &'a TableSchema,
    columns: Vec<&'a ColumnDescriptor>,
    records: Vec<Value>,
}

impl<'a> Table<'a> {
    /// Binds the schema to a record collection, resolving the displayed
    /// column set (request override, stored preference, schema defaults).
    pub fn new(
        schema: &'a TableSchema,
        records: Vec<Value>,
        requested_columns: Option<&[String]>,
        stored_columns: Option<&[String]>,
    ) -> Result<Self, ValidationErrors> {
        let columns = schema.resolve_columns(requested_columns, stored_columns)?;

        Ok(Self {
            schema,
            columns,
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable multi-column sort, leftmost key first. Keys naming columns
    /// that are unknown or not orderable are ignored.
    pub fn sort(&mut self, keys: &[SortKey]) {
        let keys: Vec<(&ColumnDescriptor, bool)> = keys
            .iter()
            .filter_map(|key| {
                self.schema
                    .column(&key.column)
                    .filter(|column| column.orderable)
                    .map(|column| (column, key.descending))
            })
            .collect();

        if keys.is_empty() {
            return;
        }

        self.records.sort_by(|a, b| {
            for (column, descending) in &keys {
                let ordering = compare_values(
                    access(a, column.accessor),
                    access(b, column.accessor),
                );
                let ordering = if *descending {
                    ordering.reverse()
                } else {
                    ordering
                };

                if ordering != Ordering::Equal {
                    return ordering;
                }
            }

            Ordering::Equal
        });
    }

    /// Keeps one page of records and reports pagination state.
    pub fn paginate(&mut self, page: u64, per_page: u64) -> PageDto {
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let page = page.max(1);
        let total_count = self.records.len() as u64;

        let start = ((page - 1) * per_page).min(total_count) as usize;
        let end = (start + per_page as usize).min(self.records.len());
        self.records = self.records[start..end].to_vec();

        PageDto {
            page,
            per_page,
            total_count,
        }
    }

    /// Renders rows of cells in resolved-column order, plus the structural
    /// selection toggle (`id`) and permission-gated action buttons.
    pub fn render(&self, ctx: &RenderContext) -> TableDto {
        let columns = self
            .columns
            .iter()
            .map(|column| ColumnDto {
                name: column.name.to_string(),
                label: column.label.to_string(),
                orderable: column.orderable,
            })
            .collect();

        let rows = self
            .records
            .iter()
            .map(|record| {
                let id = record
                    .get("id")
                    .and_then(Value::as_i64)
                    .unwrap_or_default() as i32;

                RowDto {
                    id,
                    cells: self.columns.iter().map(|column| cell(record, column)).collect(),
                    actions: row_actions(ctx, id),
                }
            })
            .collect();

        TableDto {
            name: self.schema.name.to_string(),
            columns,
            rows,
        }
    }
}

fn row_actions(ctx: &RenderContext, id: i32) -> Vec<RowActionDto> {
    let mut actions = Vec::new();

    if ctx.principal.has_permission(&ctx.change_permission) {
        actions.push(RowActionDto {
            name: "edit".to_string(),
            href: format!("/api/{}/{}", ctx.object_path, id),
        });
    }
    if ctx.principal.has_permission(&ctx.delete_permission) {
        actions.push(RowActionDto {
            name: "delete".to_string(),
            href: format!("/api/{}/{}", ctx.object_path, id),
        });
    }

    actions
}

fn cell(record: &Value, column: &ColumnDescriptor) -> CellDto {
    let resolved = access(record, column.accessor);

    let value = match (&column.kind, resolved) {
        (_, None) => Value::String(EMPTY_PLACEHOLDER.to_string()),
        (CellKind::Boolean, Some(value)) => match value.as_bool() {
            Some(flag) => Value::Bool(flag),
            None => Value::String(EMPTY_PLACEHOLDER.to_string()),
        },
        (_, Some(value)) => value.clone(),
    };

    let href = match &column.kind {
        CellKind::Count {
            list_path,
            filter_param,
        } => record
            .get("id")
            .and_then(Value::as_i64)
            .map(|id| format!("/api/{list_path}?{filter_param}={id}")),
        _ => column.link.as_ref().and_then(|rule| {
            access(record, rule.id_accessor)
                .and_then(Value::as_i64)
                .map(|id| format!("/api/{}/{}", rule.path, id))
        }),
    };

    CellDto { value, href }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        // Absent values sort last.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&b.as_f64().unwrap_or_default()),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::server::model::principal::Principal;
    use crate::server::table::column::{CellKind, ColumnDescriptor, EMPTY_PLACEHOLDER};
    use crate::server::table::schema::TableSchema;

    use super::{parse_sort, RenderContext, Table};

    fn schema() -> TableSchema {
        TableSchema::new(
            "dcim.rack",
            vec![
                ColumnDescriptor::new("name", "Name", &["name"])
                    .linked("dcim/rack", &["id"])
                    .default_visible(),
                ColumnDescriptor::new("site", "Site", &["site", "name"])
                    .linked("dcim/site", &["site", "id"])
                    .default_visible(),
                ColumnDescriptor::new("u_height", "Height", &["u_height"]).default_visible(),
                ColumnDescriptor::new("device_count", "Devices", &["device_count"])
                    .kind(CellKind::Count {
                        list_path: "dcim/device",
                        filter_param: "rack_id",
                    })
                    .not_orderable()
                    .default_visible(),
            ],
        )
    }

    fn records() -> Vec<serde_json::Value> {
        vec![
            json!({"id": 1, "name": "r2", "u_height": 42, "site": {"id": 9, "name": "fra1"}, "device_count": 3}),
            json!({"id": 2, "name": "r1", "u_height": 48, "site": {"id": 9, "name": "fra1"}, "device_count": 0}),
            json!({"id": 3, "name": "r3", "u_height": 42, "site_id": null, "device_count": 1}),
        ]
    }

    fn context(principal: &Principal) -> RenderContext {
        RenderContext {
            principal,
            object_path: "dcim/rack".to_string(),
            change_permission: "dcim.change_rack".to_string(),
            delete_permission: "dcim.delete_rack".to_string(),
        }
    }

    #[test]
    fn renders_one_row_per_record_with_resolved_columns() {
        let schema = schema();
        let table = Table::new(&schema, records(), None, None).unwrap();
        let principal = Principal::anonymous();

        let dto = table.render(&context(&principal));

        assert_eq!(dto.rows.len(), 3);
        for row in &dto.rows {
            assert_eq!(row.cells.len(), dto.columns.len());
        }
    }

    #[test]
    fn absent_relation_renders_placeholder_without_failing_row() {
        let schema = schema();
        let table = Table::new(&schema, records(), None, None).unwrap();
        let principal = Principal::anonymous();

        let dto = table.render(&context(&principal));
        let site_cell = &dto.rows[2].cells[1];

        assert_eq!(site_cell.value, serde_json::json!(EMPTY_PLACEHOLDER));
        assert!(site_cell.href.is_none());
    }

    #[test]
    fn linkified_cell_carries_detail_href() {
        let schema = schema();
        let table = Table::new(&schema, records(), None, None).unwrap();
        let principal = Principal::anonymous();

        let dto = table.render(&context(&principal));

        assert_eq!(dto.rows[0].cells[0].href.as_deref(), Some("/api/dcim/rack/1"));
        assert_eq!(dto.rows[0].cells[1].href.as_deref(), Some("/api/dcim/site/9"));
    }

    #[test]
    fn sort_on_non_orderable_column_is_ignored() {
        let schema = schema();
        let mut table = Table::new(&schema, records(), None, None).unwrap();
        let principal = Principal::anonymous();

        table.sort(&parse_sort(&["device_count".to_string()]));
        let dto = table.render(&context(&principal));

        let ids: Vec<i32> = dto.rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn multi_column_sort_applies_left_to_right() {
        let schema = schema();
        let mut table = Table::new(&schema, records(), None, None).unwrap();
        let principal = Principal::anonymous();

        table.sort(&parse_sort(&["u_height".to_string(), "-name".to_string()]));
        let dto = table.render(&context(&principal));

        let ids: Vec<i32> = dto.rows.iter().map(|row| row.id).collect();
        // 42U before 48U; within 42U, name descending: r3 before r2.
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn actions_follow_principal_permissions() {
        let schema = schema();
        let table = Table::new(&schema, records(), None, None).unwrap();
        let principal = Principal::with_permissions("ops", &["dcim.change_rack"]);

        let dto = table.render(&context(&principal));
        let actions: Vec<&str> = dto.rows[0]
            .actions
            .iter()
            .map(|action| action.name.as_str())
            .collect();

        assert_eq!(actions, vec!["edit"]);
    }

    #[test]
    fn paginate_slices_after_sort() {
        let schema = schema();
        let mut table = Table::new(&schema, records(), None, None).unwrap();
        let principal = Principal::anonymous();

        table.sort(&parse_sort(&["name".to_string()]));
        let page = table.paginate(2, 2);
        let dto = table.render(&context(&principal));

        assert_eq!(page.total_count, 3);
        assert_eq!(dto.rows.len(), 1);
        assert_eq!(dto.rows[0].id, 3);
    }
}
