use contracts::domain::a011_individual_process::aggregate::{
    IndividualProcess, IndividualProcessDto,
};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use contracts::shared::validation::ValidationError;
use contracts::shared::workflow::{enforce_fillable_fields, IndividualProcessFieldsPatch};
use sea_orm::{ConnectionTrait, TransactionTrait};
use uuid::Uuid;

use super::repository;
use crate::domain::a004_person::repository as person_repository;
use crate::domain::a005_passport::repository as passport_repository;
use crate::domain::a007_legal_framework::repository as legal_framework_repository;
use crate::domain::a008_process_type::repository as process_type_repository;
use crate::domain::a010_main_process::repository as main_process_repository;
use crate::domain::a012_individual_process_status::service as status_history;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::data::db::get_connection;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

/// Загрузка неудалённого процесса в рамках соединения или транзакции
pub async fn load_with<C: ConnectionTrait>(db: &C, id: Uuid) -> ServiceResult<IndividualProcess> {
    repository::get_by_id_with(db, id)
        .await?
        .filter(|p| !p.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found(IndividualProcess::collection_name(), id))
}

/// Сохранение с увеличением версии.
/// Если строку успели изменить параллельно, возвращается `Conflict`.
pub async fn save_versioned_with<C: ConnectionTrait>(
    db: &C,
    aggregate: &mut IndividualProcess,
) -> ServiceResult<()> {
    let expected = aggregate.base.metadata.version;
    aggregate.base.metadata.increment_version();
    aggregate.before_write();
    if !repository::update_versioned_with(db, aggregate, expected).await? {
        return Err(ServiceError::Conflict(format!(
            "individual process {} was modified concurrently (expected version {})",
            aggregate.base.id.value(),
            expected
        )));
    }
    Ok(())
}

async fn ensure_references(aggregate: &IndividualProcess) -> ServiceResult<()> {
    let main_process_id = parse_uuid(&aggregate.main_process_id)?;
    if main_process_repository::get_by_id(main_process_id)
        .await?
        .filter(|p| !p.base.metadata.is_deleted)
        .is_none()
    {
        return Err(ServiceError::not_found("main_process", main_process_id));
    }
    let person_id = parse_uuid(&aggregate.person_id)?;
    if person_repository::get_by_id(person_id)
        .await?
        .filter(|p| !p.base.metadata.is_deleted)
        .is_none()
    {
        return Err(ServiceError::not_found("person", person_id));
    }
    Ok(())
}

/// Ссылки, которые устанавливает патч, должны указывать на существующие
/// записи; паспорт должен принадлежать заявителю процесса.
async fn ensure_patch_references(
    aggregate: &IndividualProcess,
    patch: &IndividualProcessFieldsPatch,
) -> ServiceResult<()> {
    if let Some(passport_id) = patch.passport_id.as_deref() {
        let passport_id = parse_uuid(passport_id)?;
        let passport = passport_repository::get_by_id(passport_id)
            .await?
            .filter(|p| !p.base.metadata.is_deleted)
            .ok_or_else(|| ServiceError::not_found("passport", passport_id))?;
        if passport.person_id != aggregate.person_id {
            return Err(ValidationError::invalid(
                "passport_id",
                "passport belongs to another person",
            )
            .into());
        }
    }
    if let Some(process_type_id) = patch.process_type_id.as_deref() {
        let process_type_id = parse_uuid(process_type_id)?;
        if process_type_repository::get_by_id(process_type_id)
            .await?
            .filter(|p| !p.base.metadata.is_deleted)
            .is_none()
        {
            return Err(ServiceError::not_found("process_type", process_type_id));
        }
    }
    if let Some(legal_framework_id) = patch.legal_framework_id.as_deref() {
        let legal_framework_id = parse_uuid(legal_framework_id)?;
        if legal_framework_repository::get_by_id(legal_framework_id)
            .await?
            .filter(|f| !f.base.metadata.is_deleted)
            .is_none()
        {
            return Err(ServiceError::not_found("legal_framework", legal_framework_id));
        }
    }
    Ok(())
}

/// Создание индивидуального процесса. История статусов начинается
/// отдельной записью `pending_documents`.
pub async fn create(dto: IndividualProcessDto) -> ServiceResult<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("IP-{}", &Uuid::new_v4().to_string()[..8]));
    let mut aggregate = IndividualProcess::new_for_insert(code, &dto);
    aggregate.validate()?;
    ensure_references(&aggregate).await?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    activity_log::record(
        IndividualProcess::collection_name(),
        &id.to_string(),
        actions::CREATE,
        None,
    )
    .await;
    Ok(id)
}

/// Обновление реквизитов (без заполняемых полей и статуса)
pub async fn update(dto: IndividualProcessDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let db = get_connection();

    let mut aggregate = load_with(db, id).await?;
    aggregate.update(&dto);
    aggregate.validate()?;
    ensure_references(&aggregate).await?;

    save_versioned_with(db, &mut aggregate).await?;
    activity_log::record(
        IndividualProcess::collection_name(),
        &id.to_string(),
        actions::UPDATE,
        None,
    )
    .await;
    Ok(())
}

/// Изменение заполняемых полей.
///
/// Разрешены только поля из `fillable_fields` текущего статуса процесса;
/// у процесса без истории список пуст.
pub async fn update_fields(
    id: Uuid,
    patch: IndividualProcessFieldsPatch,
) -> ServiceResult<IndividualProcess> {
    let txn = get_connection().begin().await?;

    let mut aggregate = load_with(&txn, id).await?;
    if patch.is_empty() {
        return Ok(aggregate);
    }

    let current = status_history::current_case_status_with(&txn, id).await?;
    let allowed = current
        .as_ref()
        .map(|s| s.fillable_fields.clone())
        .unwrap_or_default();
    if let Err(field) = enforce_fillable_fields(&patch, &allowed) {
        return Err(ServiceError::FieldNotFillable {
            field: field.to_string(),
            status: current
                .map(|s| s.base.code)
                .unwrap_or_else(|| "none".to_string()),
        });
    }

    aggregate.apply_patch(&patch);
    aggregate.validate()?;
    ensure_patch_references(&aggregate, &patch).await?;
    save_versioned_with(&txn, &mut aggregate).await?;

    activity_log::record_with(
        &txn,
        IndividualProcess::collection_name(),
        &id.to_string(),
        actions::FIELDS_UPDATE,
        Some(patch.field_names().join(", ")),
    )
    .await?;
    txn.commit().await?;

    tracing::info!(
        "Individual process {} fields updated: {}",
        id,
        patch.field_names().join(", ")
    );
    Ok(aggregate)
}

/// Мягкое удаление
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        activity_log::record(
            IndividualProcess::collection_name(),
            &id.to_string(),
            actions::DELETE,
            None,
        )
        .await;
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<IndividualProcess>> {
    Ok(repository::get_by_id(id).await?)
}

/// Процессы, опционально отфильтрованные по основному процессу
pub async fn list(main_process_id: Option<&str>) -> ServiceResult<Vec<IndividualProcess>> {
    Ok(repository::list(main_process_id).await?)
}
