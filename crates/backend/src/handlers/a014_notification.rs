use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a014_notification::aggregate::{Notification, NotificationDto};
use contracts::domain::common::AggregateRoot;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a014_notification;
use crate::shared::error::{parse_uuid, ServiceError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub recipient: Option<String>,
    #[serde(default)]
    pub unread: bool,
}

/// GET /api/notification
pub async fn list_all(
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Notification>>, ServiceError> {
    let items = a014_notification::service::list(
        query.recipient.as_deref(),
        query.unread,
    )
    .await?;
    Ok(Json(items))
}

/// GET /api/notification/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Notification>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    a014_notification::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found(Notification::collection_name(), id))
}

/// POST /api/notification
pub async fn upsert(Json(dto): Json<NotificationDto>) -> Result<Json<serde_json::Value>, ServiceError> {
    let id = if let Some(id) = dto.id.clone() {
        a014_notification::service::update(dto).await?;
        id
    } else {
        a014_notification::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/notification/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ServiceError> {
    let uuid = parse_uuid(&id)?;
    if a014_notification::service::delete(uuid).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ServiceError::not_found(Notification::collection_name(), id))
    }
}

/// POST /api/notification/:id/read
pub async fn mark_read(Path(id): Path<String>) -> Result<Json<Notification>, ServiceError> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a014_notification::service::mark_read(uuid).await?))
}
