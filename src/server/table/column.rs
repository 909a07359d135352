//! Column descriptors and accessor paths.

use serde_json::Value;

/// Rendered in place of a value no accessor hop could produce.
pub static EMPTY_PLACEHOLDER: &str = "—";

/// Where a linkified cell points.
#[derive(Debug)]
pub struct LinkRule {
    /// Path prefix of the linked type, e.g. `dcim/site`.
    pub path: &'static str,
    /// Accessor yielding the linked record's key, e.g. `["site", "id"]`.
    pub id_accessor: &'static [&'static str],
}

/// How a resolved value is rendered.
#[derive(Debug)]
pub enum CellKind {
    Text,
    Boolean,
    /// An annotation count linking to the filtered child list.
    Count {
        list_path: &'static str,
        filter_param: &'static str,
    },
    /// A color swatch value (hex string).
    Color,
}

/// Static definition of how one table column derives its displayed value.
///
/// Descriptors are declared once per object type and shared read-only
/// across requests; a table instance only references them.
#[derive(Debug)]
pub struct ColumnDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    /// Field hops into the record (and its embedded relations).
    pub accessor: &'static [&'static str],
    pub orderable: bool,
    pub link: Option<LinkRule>,
    pub kind: CellKind,
    /// Shown when no explicit or stored column selection applies.
    pub default: bool,
}

impl ColumnDescriptor {
    pub fn new(
        name: &'static str,
        label: &'static str,
        accessor: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            accessor,
            orderable: true,
            link: None,
            kind: CellKind::Text,
            default: false,
        }
    }

    pub fn linked(mut self, path: &'static str, id_accessor: &'static [&'static str]) -> Self {
        self.link = Some(LinkRule { path, id_accessor });
        self
    }

    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn not_orderable(mut self) -> Self {
        self.orderable = false;
        self
    }

    pub fn default_visible(mut self) -> Self {
        self.default = true;
        self
    }
}

/// Walks an accessor path through a serialized record.
///
/// An absent or null hop resolves to `None`; the caller renders the empty
/// placeholder instead of failing the row.
pub fn access<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = record;
    for hop in path {
        current = current.get(hop)?;
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::access;

    #[test]
    fn walks_nested_hops() {
        let record = json!({"site": {"name": "fra1", "id": 3}});

        assert_eq!(access(&record, &["site", "name"]), Some(&json!("fra1")));
    }

    #[test]
    fn absent_intermediate_hop_resolves_to_none() {
        let record = json!({"site_id": null});

        assert_eq!(access(&record, &["site", "name"]), None);
    }

    #[test]
    fn null_leaf_resolves_to_none() {
        let record = json!({"mtu": null});

        assert_eq!(access(&record, &["mtu"]), None);
    }
}
