use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn index() -> ApiSuccess<IndexResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        IndexResponseData {
            message: "Welcome to the shop API".to_string(),
            resources: vec![
                "/products".to_string(),
                "/users".to_string(),
                "/cart".to_string(),
            ],
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexResponseData {
    pub message: String,
    pub resources: Vec<String>,
}
