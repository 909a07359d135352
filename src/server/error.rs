use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::model::api::ErrorDto;

/// Validation messages keyed by field name.
///
/// Collected while checking filter criteria or form input; an operation
/// only proceeds when the set is empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `Err(Error::Validation)` when any message was recorded.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

/// A record blocking a delete through a protected relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Dependent {
    /// Qualified type of the blocking record, e.g. `virtualization.virtual_machine`.
    pub object_type: String,
    pub id: i32,
    pub repr: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{object_type} {id} not found")]
    NotFound { object_type: String, id: i32 },
    #[error("unknown object type {app}.{name}")]
    UnknownType { app: String, name: String },
    #[error("unknown child collection {tab} for {object_type}")]
    UnknownChildCollection { object_type: String, tab: String },
    #[error("permission {permission} required")]
    Forbidden { permission: String },
    #[error("invalid input")]
    Validation(ValidationErrors),
    #[error("{object_type} {id} is referenced by {} dependent record(s)", .dependents.len())]
    Protected {
        object_type: String,
        id: i32,
        dependents: Vec<Dependent>,
    },
    #[error("operation {action} is not supported for {object_type}")]
    UnsupportedAction {
        object_type: String,
        action: &'static str,
    },
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

#[derive(Serialize)]
struct ValidationDto<'a> {
    error: &'a str,
    fields: &'a BTreeMap<String, Vec<String>>,
}

#[derive(Serialize)]
struct ProtectedDto<'a> {
    error: String,
    dependents: &'a [Dependent],
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::NotFound { .. }
            | Error::UnknownType { .. }
            | Error::UnknownChildCollection { .. } => {
                debug!("Not found: {}", self);

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            Error::Forbidden { .. } => {
                debug!("Forbidden: {}", self);

                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            Error::Validation(errors) => {
                debug!("Validation failure: {:?}", errors.errors);

                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationDto {
                        error: "validation failed",
                        fields: &errors.errors,
                    }),
                )
                    .into_response()
            }
            Error::Protected { dependents, .. } => {
                debug!("Protected delete: {}", self);

                (
                    StatusCode::CONFLICT,
                    Json(ProtectedDto {
                        error: self.to_string(),
                        dependents,
                    }),
                )
                    .into_response()
            }
            Error::UnsupportedAction { .. } => {
                debug!("Unsupported action: {}", self);

                (
                    StatusCode::METHOD_NOT_ALLOWED,
                    Json(ErrorDto {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            err => {
                error!("Internal server error: {}", err);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationErrors;

    #[test]
    fn into_result_is_ok_when_empty() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn into_result_carries_field_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "This field is required.");
        errors.add("name", "Must be unique.");

        let err = errors.clone().into_result().unwrap_err();
        match err {
            super::Error::Validation(inner) => {
                assert_eq!(inner.errors["name"].len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
