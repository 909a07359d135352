//! Request and response DTOs for the object API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// A human-readable outcome message attached to a rendered response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoticeDto {
    /// One of `success`, `warning`, `error`.
    pub level: String,
    pub message: String,
}

impl NoticeDto {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: "success".to_string(),
            message: message.into(),
        }
    }
}

/// One displayed column of a rendered table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnDto {
    pub name: String,
    pub label: String,
    pub orderable: bool,
}

/// One rendered table cell.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CellDto {
    /// The resolved display value; `—` when the accessor found nothing.
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
    /// Canonical location of the referenced record, when the column links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// One action button rendered for a row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RowActionDto {
    pub name: String,
    pub href: String,
}

/// One rendered table row.
///
/// `id` backs the per-row selection toggle used by bulk operations;
/// `actions` is the buttons column, carrying one entry per action the
/// acting principal may perform on this record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RowDto {
    pub id: i32,
    pub cells: Vec<CellDto>,
    pub actions: Vec<RowActionDto>,
}

/// A fully rendered table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableDto {
    /// Table identifier, e.g. `virtualization.cluster`.
    pub name: String,
    pub columns: Vec<ColumnDto>,
    pub rows: Vec<RowDto>,
}

/// Pagination state of a list response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageDto {
    pub page: u64,
    pub per_page: u64,
    pub total_count: u64,
}

/// Response of a List or Child-Collection operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListDto {
    pub object_type: String,
    pub table: TableDto,
    pub page: PageDto,
    /// Set when listing a child collection under a parent record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<String>,
}

/// Response of a Detail operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetailDto {
    pub object_type: String,
    pub id: i32,
    #[schema(value_type = Object)]
    pub record: serde_json::Value,
}

/// Response of a mutating operation (create, update, delete, bulk).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MutationDto {
    pub object_type: String,
    /// Key of the affected record for single-object operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Number of records affected.
    pub count: u64,
    pub notice: NoticeDto,
}

/// One entry of a bulk-rename preview.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenameEntryDto {
    pub id: i32,
    pub current_name: String,
    pub new_name: String,
}

/// Response of a BulkRename preview or commit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenameDto {
    pub object_type: String,
    pub committed: bool,
    pub entries: Vec<RenameEntryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<NoticeDto>,
}

/// Request body for BulkImport: already-parsed rows, one field map each.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkImportRequest {
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Request body for BulkEdit: one field map applied to every selected record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkEditRequest {
    pub ids: Vec<i32>,
    #[schema(value_type = Object)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Request body for BulkDelete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkDeleteRequest {
    pub ids: Vec<i32>,
}

/// Request body for BulkRename.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkRenameRequest {
    pub ids: Vec<i32>,
    /// Regular expression matched against the current name.
    pub pattern: String,
    /// Replacement template; capture groups are available as `$1`, `$2`, …
    pub replacement: String,
    /// `false` previews the outcome without writing.
    #[serde(default)]
    pub commit: bool,
}

/// Request body for storing table preferences.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferenceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i32>,
}

/// Stored table preferences for one user and table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferenceDto {
    pub table: String,
    pub columns: Option<Vec<String>>,
    pub sort: Option<Vec<String>>,
    pub per_page: Option<i32>,
}
