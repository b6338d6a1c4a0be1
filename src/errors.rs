use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch {entity}")]
    Fetch {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    pub fn fetch(entity: &'static str, source: sqlx::Error) -> Self {
        ApiError::Fetch { entity, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Fetch { entity, source } => {
                log::error!("database error while listing {entity}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": format!("Failed to fetch {entity}"),
                        "details": source.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
