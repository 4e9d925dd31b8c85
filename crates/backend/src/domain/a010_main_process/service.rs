use contracts::domain::a010_main_process::aggregate::{MainProcess, MainProcessDto};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::repository;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::data::db::get_connection;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

/// Создание основного процесса
pub async fn create(dto: MainProcessDto) -> ServiceResult<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("MP-{}", &Uuid::new_v4().to_string()[..8]));
    let mut aggregate = MainProcess::new_for_insert(code, &dto);
    aggregate.validate()?;
    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    activity_log::record(MainProcess::collection_name(), &id.to_string(), actions::CREATE, None).await;
    Ok(id)
}

/// Обновление реквизитов основного процесса
pub async fn update(dto: MainProcessDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(MainProcess::collection_name(), id))?;

    aggregate.update(&dto);
    aggregate.validate()?;
    aggregate.before_write();
    repository::update(&aggregate).await?;
    activity_log::record(MainProcess::collection_name(), &id.to_string(), actions::UPDATE, None).await;
    Ok(())
}

/// Мягкое удаление
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        activity_log::record(MainProcess::collection_name(), &id.to_string(), actions::DELETE, None)
            .await;
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<MainProcess>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<MainProcess>> {
    Ok(repository::list_all().await?)
}

/// Смена статуса основного процесса по таблице переходов.
///
/// Проверка перехода и запись выполняются в одной транзакции с проверкой
/// версии: из двух параллельных смен статуса фиксируется только одна.
pub async fn change_main_status(
    id: Uuid,
    new_status: &str,
    expected_version: Option<i32>,
) -> ServiceResult<MainProcess> {
    let txn = get_connection().begin().await?;

    let mut aggregate = repository::get_by_id_with(&txn, id)
        .await?
        .filter(|p| !p.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found(MainProcess::collection_name(), id))?;

    let version = aggregate.base.metadata.version;
    if let Some(expected) = expected_version {
        if expected != version {
            return Err(ServiceError::Conflict(format!(
                "main process {} has version {}, expected {}",
                id, version, expected
            )));
        }
    }

    let previous = aggregate.status.clone();
    if previous == new_status {
        return Ok(aggregate);
    }

    aggregate.change_status(new_status)?;
    aggregate.base.metadata.increment_version();
    aggregate.before_write();
    if !repository::update_versioned_with(&txn, &aggregate, version).await? {
        return Err(ServiceError::Conflict(format!(
            "main process {} was modified concurrently (expected version {})",
            id, version
        )));
    }

    let transition = format!("{} -> {}", previous, new_status);
    activity_log::record_with(
        &txn,
        MainProcess::collection_name(),
        &id.to_string(),
        actions::STATUS_CHANGE,
        Some(transition.clone()),
    )
    .await?;
    txn.commit().await?;

    tracing::info!("Main process {} status: {}", id, transition);
    Ok(aggregate)
}
