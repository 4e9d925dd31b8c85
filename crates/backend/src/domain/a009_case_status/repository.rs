use chrono::Utc;
use contracts::domain::a009_case_status::aggregate::{CaseStatus, CaseStatusId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::case_status_category::CaseStatusCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a009_case_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub category: String,
    pub color: String,
    pub sort_order: i32,
    pub fillable_fields_json: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CaseStatus {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let category = CaseStatusCategory::from_code(&m.category).unwrap_or_else(|| {
            tracing::warn!("Unknown case status category '{}' for {}", m.category, m.code);
            CaseStatusCategory::Preparation
        });

        CaseStatus {
            base: BaseAggregate::with_metadata(
                CaseStatusId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            category,
            color: m.color,
            sort_order: m.sort_order,
            fillable_fields: serde_json::from_str(&m.fillable_fields_json).unwrap_or_default(),
            is_active: m.is_active,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &CaseStatus) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        category: Set(aggregate.category.code().to_string()),
        color: Set(aggregate.color.clone()),
        sort_order: Set(aggregate.sort_order),
        fillable_fields_json: Set(
            serde_json::to_string(&aggregate.fillable_fields).unwrap_or_else(|_| "[]".to_string()),
        ),
        is_active: Set(aggregate.is_active),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Каталог статусов, упорядоченный по `sort_order`
pub async fn list(include_inactive: bool) -> anyhow::Result<Vec<CaseStatus>> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));
    if !include_inactive {
        select = select.filter(Column::IsActive.eq(true));
    }
    let mut items: Vec<CaseStatus> = select
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| a.base.code.cmp(&b.base.code))
    });
    Ok(items)
}

pub async fn count_all() -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<CaseStatus>> {
    get_by_id_with(conn(), id).await
}

/// Чтение в рамках переданного соединения или транзакции
pub async fn get_by_id_with<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> anyhow::Result<Option<CaseStatus>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_code(code: &str) -> anyhow::Result<Option<CaseStatus>> {
    let result = Entity::find()
        .filter(Column::Code.eq(code))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &CaseStatus) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &CaseStatus) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
