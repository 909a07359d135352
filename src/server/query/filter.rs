//! Declarative filter schemas.
//!
//! Each object type owns a [`FilterSchema`]: a set of named filter fields,
//! each parsing its raw request values into a storage condition. Criteria
//! validation is strict — an unknown field name or an unparseable value is
//! a field-keyed validation error, never silently ignored.

use std::collections::BTreeMap;

use sea_orm::{ColumnTrait, Condition};

use crate::server::error::ValidationErrors;

/// Parses the raw values supplied for one filter field into a condition.
///
/// Multiple values OR-combine within the field; the resulting conditions of
/// distinct fields AND-combine.
pub type ApplyFilter = fn(&[String]) -> Result<Condition, String>;

pub struct FilterField {
    pub name: &'static str,
    pub apply: ApplyFilter,
}

impl FilterField {
    pub fn new(name: &'static str, apply: ApplyFilter) -> Self {
        Self { name, apply }
    }
}

/// The set of filter fields one object type accepts.
pub struct FilterSchema {
    pub fields: Vec<FilterField>,
}

impl FilterSchema {
    pub fn new(fields: Vec<FilterField>) -> Self {
        Self { fields }
    }

    fn field(&self, name: &str) -> Option<&FilterField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Validates request criteria against this schema and AND-combines the
    /// per-field conditions.
    pub fn validate(
        &self,
        criteria: &BTreeMap<String, Vec<String>>,
    ) -> Result<Condition, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut condition = Condition::all();

        for (name, values) in criteria {
            match self.field(name) {
                None => errors.add(name.clone(), "Unknown filter field."),
                Some(field) => match (field.apply)(values) {
                    Ok(applied) => condition = condition.add(applied),
                    Err(message) => errors.add(name.clone(), message),
                },
            }
        }

        if errors.is_empty() {
            Ok(condition)
        } else {
            Err(errors)
        }
    }
}

/// Equality filter over an integer column; values OR-combine.
pub fn integer<C: ColumnTrait>(column: C, values: &[String]) -> Result<Condition, String> {
    let mut parsed = Vec::with_capacity(values.len());
    for value in values {
        let id: i32 = value
            .parse()
            .map_err(|_| format!("Invalid integer value: {value:?}"))?;
        parsed.push(id);
    }

    Ok(Condition::all().add(column.is_in(parsed)))
}

/// Equality filter over a string column; values OR-combine.
pub fn string<C: ColumnTrait>(column: C, values: &[String]) -> Result<Condition, String> {
    Ok(Condition::all().add(column.is_in(values.to_vec())))
}

/// Boolean filter; accepts `true`/`false`.
pub fn boolean<C: ColumnTrait>(column: C, values: &[String]) -> Result<Condition, String> {
    let value = match values {
        [single] => single
            .parse::<bool>()
            .map_err(|_| format!("Invalid boolean value: {single:?}"))?,
        _ => return Err("Expected exactly one boolean value.".to_string()),
    };

    Ok(Condition::all().add(column.eq(value)))
}

/// Substring match over one or more columns, OR-combined.
pub fn contains_any<C: ColumnTrait>(columns: &[C], term: &str) -> Condition {
    let mut condition = Condition::any();
    for column in columns {
        condition = condition.add(column.contains(term));
    }
    condition
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{FilterField, FilterSchema};

    fn criteria(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(name, values)| {
                (
                    name.to_string(),
                    values.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect()
    }

    fn schema() -> FilterSchema {
        FilterSchema::new(vec![
            FilterField::new("status", |values| {
                super::string(entity::cluster::Column::Status, values)
            }),
            FilterField::new("cluster_type_id", |values| {
                super::integer(entity::cluster::Column::ClusterTypeId, values)
            }),
        ])
    }

    #[test]
    fn accepts_known_fields() {
        let result = schema().validate(&criteria(&[("status", &["active"])]));

        assert!(result.is_ok());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = schema().validate(&criteria(&[("flavor", &["large"])]));

        let errors = result.unwrap_err();
        assert_eq!(errors.errors["flavor"], vec!["Unknown filter field."]);
    }

    #[test]
    fn rejects_unparseable_values() {
        let result = schema().validate(&criteria(&[("cluster_type_id", &["core"])]));

        let errors = result.unwrap_err();
        assert!(errors.errors["cluster_type_id"][0].contains("Invalid integer"));
    }
}
