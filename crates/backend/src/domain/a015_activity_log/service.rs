use contracts::domain::a015_activity_log::aggregate::{ActivityLogEntry, ActivityLogQuery};
use sea_orm::ConnectionTrait;

use super::repository;
use crate::shared::data::db::get_connection;

/// Инициатор действий, выполняемых без пользовательского контекста
pub const SYSTEM_ACTOR: &str = "system";

/// Записать действие в журнал внутри транзакции
pub async fn record_with<C: ConnectionTrait>(
    db: &C,
    entity_type: &str,
    entity_id: &str,
    action: &str,
    details: Option<String>,
) -> anyhow::Result<()> {
    repository::insert_with(db, SYSTEM_ACTOR, entity_type, entity_id, action, details).await
}

/// Записать действие в журнал. Ошибка записи журнала не прерывает операцию.
pub async fn record(entity_type: &str, entity_id: &str, action: &str, details: Option<String>) {
    if let Err(e) = record_with(get_connection(), entity_type, entity_id, action, details).await {
        tracing::warn!(
            "Failed to write activity log for {} {}: {}",
            entity_type,
            entity_id,
            e
        );
    }
}

pub async fn list(query: ActivityLogQuery) -> anyhow::Result<Vec<ActivityLogEntry>> {
    repository::list(&query).await
}
