use chrono::Utc;
use contracts::domain::a015_activity_log::aggregate::{ActivityLogEntry, ActivityLogQuery};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a015_activity_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub actor: String,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub details: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ActivityLogEntry {
    fn from(m: Model) -> Self {
        ActivityLogEntry {
            id: m.id,
            timestamp: m.timestamp,
            actor: m.actor,
            entity_type: m.entity_type,
            entity_id: m.entity_id,
            action: m.action,
            details: m.details,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Добавить запись в журнал (в рамках переданного соединения или транзакции)
pub async fn insert_with<C: ConnectionTrait>(
    db: &C,
    actor: &str,
    entity_type: &str,
    entity_id: &str,
    action: &str,
    details: Option<String>,
) -> anyhow::Result<()> {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        timestamp: Set(now),
        actor: Set(actor.to_string()),
        entity_type: Set(entity_type.to_string()),
        entity_id: Set(entity_id.to_string()),
        action: Set(action.to_string()),
        details: Set(details),
    };

    active.insert(db).await?;
    Ok(())
}

/// Записи журнала, новые сверху
pub async fn list(query: &ActivityLogQuery) -> anyhow::Result<Vec<ActivityLogEntry>> {
    let mut select = Entity::find();
    if let Some(entity_type) = &query.entity_type {
        select = select.filter(Column::EntityType.eq(entity_type.clone()));
    }
    if let Some(entity_id) = &query.entity_id {
        select = select.filter(Column::EntityId.eq(entity_id.clone()));
    }
    let items = select
        .order_by_desc(Column::Id)
        .limit(query.limit.unwrap_or(500))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
