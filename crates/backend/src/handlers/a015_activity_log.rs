use axum::{extract::Query, Json};
use contracts::domain::a015_activity_log::aggregate::{ActivityLogEntry, ActivityLogQuery};

use crate::domain::a015_activity_log::service;
use crate::shared::error::ServiceError;

/// GET /api/activity_log?entity_type=&entity_id=&limit=
pub async fn list(
    Query(query): Query<ActivityLogQuery>,
) -> Result<Json<Vec<ActivityLogEntry>>, ServiceError> {
    Ok(Json(service::list(query).await?))
}
