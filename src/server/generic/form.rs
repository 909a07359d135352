//! Typed extraction from submitted field maps.
//!
//! [`FieldMap`] wraps one request's field map and hands out typed values,
//! collecting field-keyed messages for anything of the wrong shape. A key
//! that is absent from the map is simply not extracted, which is what lets
//! BulkEdit leave unset fields untouched. Unknown keys are ignored.

use serde_json::{Map, Value};

use crate::server::error::ValidationErrors;

/// Records a "required" error for every listed field the map lacks.
/// Used by create-path validation; updates only touch supplied fields.
pub fn require_present(
    input: &Map<String, Value>,
    fields: &[&str],
    errors: &mut ValidationErrors,
) {
    for field in fields {
        if !input.contains_key(*field) {
            errors.add(*field, "This field is required.");
        }
    }
}

pub struct FieldMap<'a> {
    input: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldMap<'a> {
    pub fn new(input: &'a Map<String, Value>) -> Self {
        Self {
            input,
            errors: ValidationErrors::new(),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.input.contains_key(key)
    }

    /// A required-shape string; null or non-string records an error.
    pub fn string(&mut self, key: &str) -> Option<String> {
        match self.input.get(key)? {
            Value::String(value) => Some(value.clone()),
            _ => {
                self.errors.add(key, "Expected a string value.");
                None
            }
        }
    }

    /// A nullable string column: null clears the field.
    pub fn opt_string(&mut self, key: &str) -> Option<Option<String>> {
        match self.input.get(key)? {
            Value::Null => Some(None),
            Value::String(value) => Some(Some(value.clone())),
            _ => {
                self.errors.add(key, "Expected a string value or null.");
                None
            }
        }
    }

    pub fn integer(&mut self, key: &str) -> Option<i32> {
        match self.input.get(key)? {
            Value::Number(value) => match value.as_i64().and_then(|v| i32::try_from(v).ok()) {
                Some(value) => Some(value),
                None => {
                    self.errors.add(key, "Integer value out of range.");
                    None
                }
            },
            _ => {
                self.errors.add(key, "Expected an integer value.");
                None
            }
        }
    }

    /// A nullable integer column: null clears the field.
    pub fn opt_integer(&mut self, key: &str) -> Option<Option<i32>> {
        match self.input.get(key)? {
            Value::Null => Some(None),
            Value::Number(value) => match value.as_i64().and_then(|v| i32::try_from(v).ok()) {
                Some(value) => Some(Some(value)),
                None => {
                    self.errors.add(key, "Integer value out of range.");
                    None
                }
            },
            _ => {
                self.errors.add(key, "Expected an integer value or null.");
                None
            }
        }
    }

    pub fn boolean(&mut self, key: &str) -> Option<bool> {
        match self.input.get(key)? {
            Value::Bool(value) => Some(*value),
            _ => {
                self.errors.add(key, "Expected a boolean value.");
                None
            }
        }
    }

    /// Succeeds only when no extraction recorded an error.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FieldMap;

    #[test]
    fn absent_keys_are_not_extracted() {
        let input = json!({"name": "vm1"});
        let mut fields = FieldMap::new(input.as_object().unwrap());

        assert_eq!(fields.string("name").as_deref(), Some("vm1"));
        assert_eq!(fields.integer("vcpus"), None);
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn wrong_shape_is_a_field_error() {
        let input = json!({"vcpus": "four"});
        let mut fields = FieldMap::new(input.as_object().unwrap());

        assert_eq!(fields.integer("vcpus"), None);
        let errors = fields.finish().unwrap_err();
        assert!(errors.errors.contains_key("vcpus"));
    }

    #[test]
    fn null_clears_nullable_fields() {
        let input = json!({"role_id": null});
        let mut fields = FieldMap::new(input.as_object().unwrap());

        assert_eq!(fields.opt_integer("role_id"), Some(None));
        assert!(fields.finish().is_ok());
    }
}
