use crate::ApiError;
use axum::http::Uri;
use axum::response::IntoResponse;

pub async fn default_handler(uri: Uri) -> impl IntoResponse {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
