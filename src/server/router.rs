//! HTTP routing and OpenAPI documentation configuration.
//!
//! All object and preference endpoints are registered here with their
//! OpenAPI specifications, and Swagger UI serves the interactive
//! documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router.
///
/// # Registered Endpoints
/// - `GET|POST /api/{app}/{type}` - List records / create a record
/// - `GET|PUT|DELETE /api/{app}/{type}/{id}` - Detail / update / delete
/// - `POST /api/{app}/{type}/bulk/import` - Bulk import
/// - `POST /api/{app}/{type}/bulk/edit` - Bulk edit
/// - `POST /api/{app}/{type}/bulk/delete` - Bulk delete
/// - `POST /api/{app}/{type}/bulk/rename` - Bulk rename (preview/commit)
/// - `GET /api/{app}/{type}/{id}/{tab}` - Child collection listing
/// - `GET|PUT /api/preferences/{app}/{type}` - Stored table preferences
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Gantry", description = "Gantry inventory API"), tags(
        (name = controller::objects::OBJECTS_TAG, description = "Generic object API routes"),
        (name = controller::preference::PREFERENCES_TAG, description = "Stored table preference routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::objects::list, controller::objects::create))
        .routes(routes!(
            controller::objects::detail,
            controller::objects::update,
            controller::objects::delete
        ))
        .routes(routes!(controller::objects::bulk_import))
        .routes(routes!(controller::objects::bulk_edit))
        .routes(routes!(controller::objects::bulk_delete))
        .routes(routes!(controller::objects::bulk_rename))
        .routes(routes!(controller::objects::children))
        .routes(routes!(
            controller::preference::get_preference,
            controller::preference::set_preference
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
