use crate::error::AppError;
use crate::models::StatQuery;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use types::stats::CategoryCounts;
use types::window::Lookback;

pub async fn get_stats(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<CategoryCounts>, AppError> {
    let query = StatQuery::from_pairs(pairs);
    let lookback = Lookback::parse(query.time.as_deref())?;
    let counts = state.aggregation.aggregate(lookback).await?;
    Ok(Json(counts))
}
