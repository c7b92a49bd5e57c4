use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use suid::SuidTextExt;

use crate::server::service::AppState;

/// `GET /blocks?blocks=N` - allocate fresh id blocks.
///
/// The count parameter is optional; a missing or unparsable value counts as
/// one, and out-of-range values are clamped by the allocator. The response
/// is a JSON array of tagged strings in allocation order.
pub async fn next_blocks(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<String>>, AppError> {
    let count = params
        .get("blocks")
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(1);

    // The store may block on disk; keep it off the async worker threads.
    let allocator = state.allocator();
    let blocks = tokio::task::spawn_blocking(move || allocator.next_blocks(count))
        .await
        .map_err(AppError::join)??;

    Ok(Json(blocks.iter().map(SuidTextExt::to_tagged).collect()))
}

/// `GET /next` - issue a single id from the shared pool.
pub async fn next_id(State(state): State<AppState>) -> Result<Json<String>, AppError> {
    let pool = state.pool();
    let id = tokio::task::spawn_blocking(move || pool.lock().next())
        .await
        .map_err(AppError::join)??;

    Ok(Json(id.to_tagged()))
}

/// Maps core errors onto HTTP status codes at the service boundary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Suid(#[from] suid::Error),

    #[error("internal error: {context}")]
    Internal { context: String },
}

impl AppError {
    fn join(err: tokio::task::JoinError) -> Self {
        Self::Internal {
            context: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // The counter being unreachable is the backend's problem, not
            // the client's; signal that a retry may succeed.
            Self::Suid(suid::Error::Store(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Suid(suid::Error::Codec(_)) => StatusCode::BAD_REQUEST,
            Self::Suid(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(%status, error = %self, "request failed");
        (status, self.to_string()).into_response()
    }
}
