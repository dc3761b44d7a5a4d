use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ct_core::{Bookmark, Error};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use crate::AppState;

pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Error::Connectivity(_) | Error::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Fetch(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookmark {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Removed {
    pub removed: Option<Bookmark>,
}

pub async fn list_bookmarks(State(state): State<Arc<AppState>>) -> Json<Vec<Bookmark>> {
    Json(state.page.bookmarks().list().await)
}

pub async fn add_bookmark(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddBookmark>,
) -> Result<impl IntoResponse, ApiError> {
    let bookmark = state
        .page
        .add_bookmark(&request.url, request.title.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

pub async fn remove_bookmark(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<Removed>, ApiError> {
    let removed = state.page.remove_bookmark(index).await?;
    Ok(Json(Removed { removed }))
}

pub async fn get_content(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.page.load().await?;
    Ok(Json(outcome))
}
