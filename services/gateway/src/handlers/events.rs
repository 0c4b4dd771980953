use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::Uri};
use percent_encoding::percent_decode_str;

/// Register the category named by the request path.
///
/// Serves `/{category}` and every path no other route takes (`/`, `/a/b`,
/// ...). The path is decoded lossily, so malformed escapes still produce a
/// name that is simply not allow-listed.
pub async fn register_event(State(state): State<AppState>, uri: Uri) -> Result<String, AppError> {
    let raw = uri.path().strip_prefix('/').unwrap_or(uri.path());
    let category = percent_decode_str(raw).decode_utf8_lossy();
    let event = state.ingestion.register(&category).await?;
    Ok(format!("Event {} successfully registered", event.category))
}
