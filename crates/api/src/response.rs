//! Shared response envelope types for API handlers.
//!
//! All JSON responses use a `{ "data": ... }` envelope; paginated listings
//! add a `meta` block. CSV exports are sent as attachments.

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use phonelive_data::models::pagination::Paginated;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Pagination block of a listing response.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

/// `{ "data": T, "meta": { page, limit, total } }` envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: T,
    pub meta: PageMeta,
}

impl<T: Serialize> From<Paginated<T>> for PageResponse<Vec<T>> {
    fn from(page: Paginated<T>) -> Self {
        Self {
            meta: PageMeta {
                page: page.page,
                limit: page.limit,
                total: page.total,
            },
            data: page.items,
        }
    }
}

/// A rendered CSV document ready to be downloaded.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

impl IntoResponse for CsvExport {
    fn into_response(self) -> Response {
        (
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.content,
        )
            .into_response()
    }
}
