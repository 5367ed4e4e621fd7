use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use models::{camping_summary, rating_summary};

use super::ServerState;
use crate::errors::JsonApiError;

/// Aggregates for one campsite; either side may be missing before the first
/// review or bookmark.
#[derive(Debug, Serialize)]
pub struct CampSummaryResponse {
    pub camp_id: i64,
    pub camping: Option<camping_summary::Model>,
    pub rating: Option<rating_summary::Model>,
}

pub async fn get_camp_summary(
    State(state): State<ServerState>,
    Path(camp_id): Path<i64>,
) -> Result<Json<CampSummaryResponse>, JsonApiError> {
    let camping = camping_summary::find_by_camp(&state.db, camp_id)
        .await
        .map_err(service::errors::ServiceError::from)?;
    let rating = rating_summary::find_by_camp(&state.db, camp_id)
        .await
        .map_err(service::errors::ServiceError::from)?;
    Ok(Json(CampSummaryResponse { camp_id, camping, rating }))
}
