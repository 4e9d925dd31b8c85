use contracts::domain::a012_individual_process_status::aggregate::{
    IndividualProcessStatus, IndividualProcessStatusId,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a012_individual_process_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub individual_process_id: String,
    pub case_status_id: String,
    pub status_code: String,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for IndividualProcessStatus {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        IndividualProcessStatus {
            id: IndividualProcessStatusId(uuid),
            individual_process_id: m.individual_process_id,
            case_status_id: m.case_status_id,
            status_code: m.status_code,
            date: m.date,
            notes: m.notes,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// История процесса в порядке создания
pub async fn list_by_process_with<C: ConnectionTrait>(
    db: &C,
    individual_process_id: &str,
) -> anyhow::Result<Vec<IndividualProcessStatus>> {
    let items = Entity::find()
        .filter(Column::IndividualProcessId.eq(individual_process_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id_with<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> anyhow::Result<Option<IndividualProcessStatus>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert_with<C: ConnectionTrait>(
    db: &C,
    record: &IndividualProcessStatus,
) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(record.id.value().to_string()),
        individual_process_id: Set(record.individual_process_id.clone()),
        case_status_id: Set(record.case_status_id.clone()),
        status_code: Set(record.status_code.clone()),
        date: Set(record.date.clone()),
        notes: Set(record.notes.clone()),
        is_active: Set(record.is_active),
        created_at: Set(record.created_at),
    };
    active.insert(db).await?;
    Ok(())
}

/// Снять флаг активности со всех записей процесса
pub async fn deactivate_all_with<C: ConnectionTrait>(
    db: &C,
    individual_process_id: &str,
) -> anyhow::Result<u64> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(false))
        .filter(Column::IndividualProcessId.eq(individual_process_id))
        .filter(Column::IsActive.eq(true))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn set_active_with<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<()> {
    use sea_orm::sea_query::Expr;
    Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(true))
        .filter(Column::Id.eq(id.to_string()))
        .exec(db)
        .await?;
    Ok(())
}

/// Физическое удаление записи истории
pub async fn delete_with<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Количество записей, ссылающихся на статус каталога
pub async fn count_by_case_status(case_status_id: &str) -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::CaseStatusId.eq(case_status_id))
        .count(conn())
        .await?;
    Ok(count)
}
