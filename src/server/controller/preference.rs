//! Stored table preference handlers.
//!
//! The Table Renderer reads these per-user rows when resolving the column
//! set, sort order, and page size of a list response.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::model::api::{PreferenceDto, PreferenceRequest};
use crate::server::data::preference::PreferenceRepository;
use crate::server::error::Error;
use crate::server::model::{app::AppState, principal::Principal};

pub static PREFERENCES_TAG: &str = "preferences";

/// Read the acting user's stored configuration for one table
#[utoipa::path(
    get,
    path = "/api/preferences/{app}/{type}",
    tag = PREFERENCES_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name")
    ),
    responses(
        (status = 200, description = "Stored preferences, empty when none", body = PreferenceDto)
    ),
)]
pub async fn get_preference(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type)): Path<(String, String)>,
) -> Result<Json<PreferenceDto>, Error> {
    let table = format!("{app}.{object_type}");
    let stored = PreferenceRepository::new(&state.db)
        .get(&principal.username, &table)
        .await?;

    let dto = match stored {
        Some(preference) => PreferenceDto {
            table,
            columns: PreferenceRepository::string_list(preference.columns.as_ref()),
            sort: PreferenceRepository::string_list(preference.sort.as_ref()),
            per_page: preference.per_page,
        },
        None => PreferenceDto {
            table,
            columns: None,
            sort: None,
            per_page: None,
        },
    };

    Ok(Json(dto))
}

/// Store the acting user's configuration for one table
#[utoipa::path(
    put,
    path = "/api/preferences/{app}/{type}",
    tag = PREFERENCES_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name")
    ),
    request_body = PreferenceRequest,
    responses(
        (status = 200, description = "Stored preferences", body = PreferenceDto),
        (status = 403, description = "Anonymous principals cannot store preferences")
    ),
)]
pub async fn set_preference(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type)): Path<(String, String)>,
    Json(request): Json<PreferenceRequest>,
) -> Result<Json<PreferenceDto>, Error> {
    if principal.username.is_empty() {
        return Err(Error::Forbidden {
            permission: "an authenticated session".to_string(),
        });
    }

    let table = format!("{app}.{object_type}");
    let stored = PreferenceRepository::new(&state.db)
        .set(
            &principal.username,
            &table,
            request.columns,
            request.sort,
            request.per_page,
        )
        .await?;

    Ok(Json(PreferenceDto {
        table,
        columns: PreferenceRepository::string_list(stored.columns.as_ref()),
        sort: PreferenceRepository::string_list(stored.sort.as_ref()),
        per_page: stored.per_page,
    }))
}
