use chrono::Utc;
use contracts::domain::a013_task::aggregate::{Task, TaskId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::task_enums::{TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a013_task")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub individual_process_id: Option<String>,
    pub main_process_id: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub priority: String,
    pub status: String,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Task {
            base: BaseAggregate::with_metadata(
                TaskId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            individual_process_id: m.individual_process_id,
            main_process_id: m.main_process_id,
            assigned_to: m.assigned_to,
            due_date: m.due_date,
            priority: TaskPriority::from_code(&m.priority).unwrap_or_default(),
            status: TaskStatus::from_code(&m.status).unwrap_or_default(),
            completed_at: m.completed_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Task) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        individual_process_id: Set(aggregate.individual_process_id.clone()),
        main_process_id: Set(aggregate.main_process_id.clone()),
        assigned_to: Set(aggregate.assigned_to.clone()),
        due_date: Set(aggregate.due_date.clone()),
        priority: Set(aggregate.priority.code().to_string()),
        status: Set(aggregate.status.code().to_string()),
        completed_at: Set(aggregate.completed_at),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Задачи по процессу; без фильтров возвращаются все
pub async fn list(
    individual_process_id: Option<&str>,
    main_process_id: Option<&str>,
) -> anyhow::Result<Vec<Task>> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(value) = individual_process_id {
        select = select.filter(Column::IndividualProcessId.eq(value));
    }
    if let Some(value) = main_process_id {
        select = select.filter(Column::MainProcessId.eq(value));
    }
    let mut items: Vec<Task> = select
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.due_date
            .is_none()
            .cmp(&b.due_date.is_none())
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Task>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Task) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &Task) -> anyhow::Result<()> {
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
