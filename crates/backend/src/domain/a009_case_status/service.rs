use contracts::domain::a009_case_status::aggregate::{CaseStatus, CaseStatusDto};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository;
use crate::domain::a012_individual_process_status::repository as history_repository;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

async fn ensure_code_is_free(aggregate: &CaseStatus) -> ServiceResult<()> {
    if let Some(other) = repository::get_by_code(&aggregate.base.code).await? {
        if other.base.id != aggregate.base.id {
            return Err(ServiceError::DuplicateCode(aggregate.base.code.clone()));
        }
    }
    Ok(())
}

/// Создание статуса в каталоге
pub async fn create(dto: CaseStatusDto) -> ServiceResult<Uuid> {
    let mut aggregate = CaseStatus::new_for_insert(&dto);
    aggregate.validate()?;
    ensure_code_is_free(&aggregate).await?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    tracing::info!("Case status '{}' created", aggregate.base.code);
    activity_log::record(CaseStatus::collection_name(), &id.to_string(), actions::CREATE, None)
        .await;
    Ok(id)
}

/// Код статуса, на который ссылается история, неизменяем
async fn ensure_code_unchanged_if_referenced(
    id: Uuid,
    current_code: &str,
    new_code: &str,
) -> ServiceResult<()> {
    if current_code == new_code {
        return Ok(());
    }
    let references = history_repository::count_by_case_status(&id.to_string()).await?;
    if references > 0 {
        return Err(ServiceError::InUse(format!(
            "Case status code '{}' ({} status history records)",
            current_code, references
        )));
    }
    Ok(())
}

/// Обновление статуса. Код меняется только если он свободен и не
/// используется историей.
pub async fn update(dto: CaseStatusDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .filter(|s| !s.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found(CaseStatus::collection_name(), id))?;

    ensure_code_unchanged_if_referenced(id, &aggregate.base.code, dto.code.trim()).await?;
    aggregate.update(&dto);
    aggregate.validate()?;
    ensure_code_is_free(&aggregate).await?;

    aggregate.before_write();
    repository::update(&aggregate).await?;
    activity_log::record(CaseStatus::collection_name(), &id.to_string(), actions::UPDATE, None)
        .await;
    Ok(())
}

/// Мягкое удаление. Статус, на который ссылается история, удалить нельзя.
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    let references = history_repository::count_by_case_status(&id.to_string()).await?;
    if references > 0 {
        return Err(ServiceError::InUse(format!(
            "Case status {} ({} status history records)",
            id, references
        )));
    }

    let deleted = repository::soft_delete(id).await?;
    if deleted {
        activity_log::record(CaseStatus::collection_name(), &id.to_string(), actions::DELETE, None)
            .await;
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<CaseStatus>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn get_by_code(code: &str) -> ServiceResult<Option<CaseStatus>> {
    Ok(repository::get_by_code(code).await?)
}

/// Каталог статусов; неактивные только по запросу
pub async fn list(include_inactive: bool) -> ServiceResult<Vec<CaseStatus>> {
    Ok(repository::list(include_inactive).await?)
}
