use chrono::Utc;
use contracts::domain::a011_individual_process::aggregate::{
    IndividualProcess, IndividualProcessId,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a011_individual_process")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub main_process_id: String,
    pub person_id: String,
    pub case_status_id: Option<String>,
    pub passport_id: Option<String>,
    pub process_type_id: Option<String>,
    pub legal_framework_id: Option<String>,
    pub protocol_number: Option<String>,
    pub rnm_number: Option<String>,
    pub rnm_deadline: Option<String>,
    pub appointment_date: Option<String>,
    pub deadline_date: Option<String>,
    pub cbo_code: Option<String>,
    pub salary: Option<f64>,
    pub notes: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for IndividualProcess {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        IndividualProcess {
            base: BaseAggregate::with_metadata(
                IndividualProcessId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            main_process_id: m.main_process_id,
            person_id: m.person_id,
            case_status_id: m.case_status_id,
            passport_id: m.passport_id,
            process_type_id: m.process_type_id,
            legal_framework_id: m.legal_framework_id,
            protocol_number: m.protocol_number,
            rnm_number: m.rnm_number,
            rnm_deadline: m.rnm_deadline,
            appointment_date: m.appointment_date,
            deadline_date: m.deadline_date,
            cbo_code: m.cbo_code,
            salary: m.salary,
            notes: m.notes,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &IndividualProcess) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        main_process_id: Set(aggregate.main_process_id.clone()),
        person_id: Set(aggregate.person_id.clone()),
        case_status_id: Set(aggregate.case_status_id.clone()),
        passport_id: Set(aggregate.passport_id.clone()),
        process_type_id: Set(aggregate.process_type_id.clone()),
        legal_framework_id: Set(aggregate.legal_framework_id.clone()),
        protocol_number: Set(aggregate.protocol_number.clone()),
        rnm_number: Set(aggregate.rnm_number.clone()),
        rnm_deadline: Set(aggregate.rnm_deadline.clone()),
        appointment_date: Set(aggregate.appointment_date.clone()),
        deadline_date: Set(aggregate.deadline_date.clone()),
        cbo_code: Set(aggregate.cbo_code.clone()),
        salary: Set(aggregate.salary),
        notes: Set(aggregate.notes.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Процессы, опционально отфильтрованные по основному процессу
pub async fn list(main_process_id: Option<&str>) -> anyhow::Result<Vec<IndividualProcess>> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(value) = main_process_id {
        select = select.filter(Column::MainProcessId.eq(value));
    }
    let mut items: Vec<IndividualProcess> = select
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.base.code.cmp(&b.base.code));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<IndividualProcess>> {
    get_by_id_with(conn(), id).await
}

pub async fn get_by_id_with<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> anyhow::Result<Option<IndividualProcess>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &IndividualProcess) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

/// Запись с проверкой версии (optimistic locking).
///
/// `aggregate` уже несёт новую версию; строка обновляется только если в базе
/// всё ещё `expected_version`. Возвращает `false`, если запись изменили
/// параллельно или она не найдена.
pub async fn update_versioned_with<C: ConnectionTrait>(
    db: &C,
    aggregate: &IndividualProcess,
    expected_version: i32,
) -> anyhow::Result<bool> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    let result = Entity::update_many()
        .set(active)
        .filter(Column::Id.eq(aggregate.base.id.value().to_string()))
        .filter(Column::Version.eq(expected_version))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
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
