//! Generic object API handlers.
//!
//! Every inventory type is served by the same handlers; the `{app}/{type}`
//! path segments select the registered view set, and the acting principal
//! arrives via the auth-proxy headers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{Map, Value};

use crate::model::api::{
    BulkDeleteRequest, BulkEditRequest, BulkImportRequest, BulkRenameRequest, DetailDto, ListDto,
    MutationDto, RenameDto,
};
use crate::server::error::Error;
use crate::server::generic::ListParams;
use crate::server::model::{app::AppState, principal::Principal};

pub static OBJECTS_TAG: &str = "objects";

/// List records of a type, filtered, annotated, and rendered as a table
#[utoipa::path(
    get,
    path = "/api/{app}/{type}",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name")
    ),
    responses(
        (status = 200, description = "Rendered table of matching records", body = ListDto),
        (status = 400, description = "Invalid filter criteria"),
        (status = 403, description = "Missing view permission"),
        (status = 404, description = "Unknown object type")
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListDto>, Error> {
    let params = ListParams::from_pairs(pairs)?;
    let view = state.registry.view(&app, &object_type)?;

    let dto = view.list(&state.db, &principal, &params).await?;

    Ok(Json(dto))
}

/// Load a single record by key
#[utoipa::path(
    get,
    path = "/api/{app}/{type}/{id}",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name"),
        ("id" = i32, Path, description = "Record key")
    ),
    responses(
        (status = 200, description = "The record", body = DetailDto),
        (status = 403, description = "Missing view permission"),
        (status = 404, description = "Record or type not found")
    ),
)]
pub async fn detail(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type, id)): Path<(String, String, i32)>,
) -> Result<Json<DetailDto>, Error> {
    let view = state.registry.view(&app, &object_type)?;

    let dto = view.detail(&state.db, &principal, id).await?;

    Ok(Json(dto))
}

/// Create a record from a field map
#[utoipa::path(
    post,
    path = "/api/{app}/{type}",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name")
    ),
    responses(
        (status = 200, description = "Record created", body = MutationDto),
        (status = 400, description = "Validation failure with field errors"),
        (status = 403, description = "Missing add permission")
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type)): Path<(String, String)>,
    Json(input): Json<Map<String, Value>>,
) -> Result<Json<MutationDto>, Error> {
    let view = state.registry.view(&app, &object_type)?;

    let dto = view.create(&state.db, &principal, input).await?;

    Ok(Json(dto))
}

/// Update a record from a field map; absent fields stay untouched
#[utoipa::path(
    put,
    path = "/api/{app}/{type}/{id}",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name"),
        ("id" = i32, Path, description = "Record key")
    ),
    responses(
        (status = 200, description = "Record updated", body = MutationDto),
        (status = 400, description = "Validation failure with field errors"),
        (status = 403, description = "Missing change permission"),
        (status = 404, description = "Record not found")
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type, id)): Path<(String, String, i32)>,
    Json(input): Json<Map<String, Value>>,
) -> Result<Json<MutationDto>, Error> {
    let view = state.registry.view(&app, &object_type)?;

    let dto = view.update(&state.db, &principal, id, input).await?;

    Ok(Json(dto))
}

/// Delete a record unless protected relations block it
#[utoipa::path(
    delete,
    path = "/api/{app}/{type}/{id}",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name"),
        ("id" = i32, Path, description = "Record key")
    ),
    responses(
        (status = 200, description = "Record deleted", body = MutationDto),
        (status = 403, description = "Missing delete permission"),
        (status = 404, description = "Record not found"),
        (status = 409, description = "Blocked by dependent records")
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type, id)): Path<(String, String, i32)>,
) -> Result<Json<MutationDto>, Error> {
    let view = state.registry.view(&app, &object_type)?;

    let dto = view.delete(&state.db, &principal, id).await?;

    Ok(Json(dto))
}

/// Import a batch of already-parsed rows, all-or-nothing
#[utoipa::path(
    post,
    path = "/api/{app}/{type}/bulk/import",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name")
    ),
    request_body = BulkImportRequest,
    responses(
        (status = 200, description = "Batch imported", body = MutationDto),
        (status = 400, description = "Row validation failure; nothing imported")
    ),
)]
pub async fn bulk_import(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type)): Path<(String, String)>,
    Json(request): Json<BulkImportRequest>,
) -> Result<Json<MutationDto>, Error> {
    let view = state.registry.view(&app, &object_type)?;

    let dto = view.bulk_import(&state.db, &principal, request.rows).await?;

    Ok(Json(dto))
}

/// Apply one field map to a selected set of records, all-or-nothing
#[utoipa::path(
    post,
    path = "/api/{app}/{type}/bulk/edit",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name")
    ),
    request_body = BulkEditRequest,
    responses(
        (status = 200, description = "Selection updated", body = MutationDto),
        (status = 400, description = "Validation failure; nothing modified"),
        (status = 404, description = "A selected record was not found")
    ),
)]
pub async fn bulk_edit(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type)): Path<(String, String)>,
    Json(request): Json<BulkEditRequest>,
) -> Result<Json<MutationDto>, Error> {
    let view = state.registry.view(&app, &object_type)?;

    let dto = view
        .bulk_edit(&state.db, &principal, request.ids, request.data)
        .await?;

    Ok(Json(dto))
}

/// Delete a selected set of records, all-or-nothing
#[utoipa::path(
    post,
    path = "/api/{app}/{type}/bulk/delete",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name")
    ),
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Selection deleted", body = MutationDto),
        (status = 404, description = "A selected record was not found"),
        (status = 409, description = "Blocked by dependent records; nothing deleted")
    ),
)]
pub async fn bulk_delete(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type)): Path<(String, String)>,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<MutationDto>, Error> {
    let view = state.registry.view(&app, &object_type)?;

    let dto = view.bulk_delete(&state.db, &principal, request.ids).await?;

    Ok(Json(dto))
}

/// Preview or commit a pattern rename over a selected set of records
#[utoipa::path(
    post,
    path = "/api/{app}/{type}/bulk/rename",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Application name"),
        ("type" = String, Path, description = "Object type name")
    ),
    request_body = BulkRenameRequest,
    responses(
        (status = 200, description = "Preview or committed rename", body = RenameDto),
        (status = 400, description = "Invalid pattern or validation failure"),
        (status = 404, description = "A selected record was not found")
    ),
)]
pub async fn bulk_rename(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type)): Path<(String, String)>,
    Json(request): Json<BulkRenameRequest>,
) -> Result<Json<RenameDto>, Error> {
    let view = state.registry.view(&app, &object_type)?;

    let dto = view.bulk_rename(&state.db, &principal, request).await?;

    Ok(Json(dto))
}

/// List a child collection scoped to one parent record
#[utoipa::path(
    get,
    path = "/api/{app}/{type}/{id}/{tab}",
    tag = OBJECTS_TAG,
    params(
        ("app" = String, Path, description = "Parent application name"),
        ("type" = String, Path, description = "Parent object type name"),
        ("id" = i32, Path, description = "Parent record key"),
        ("tab" = String, Path, description = "Child collection tab")
    ),
    responses(
        (status = 200, description = "Rendered child table with active tab", body = ListDto),
        (status = 404, description = "Parent record or tab not found")
    ),
)]
pub async fn children(
    State(state): State<AppState>,
    principal: Principal,
    Path((app, object_type, id, tab)): Path<(String, String, i32, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListDto>, Error> {
    let params = ListParams::from_pairs(pairs)?;
    let collection = state.registry.child(&app, &object_type, &tab)?;

    let dto = collection.list(&state.db, &principal, id, &params).await?;

    Ok(Json(dto))
}
