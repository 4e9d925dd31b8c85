use contracts::domain::a003_company::aggregate::{Company, CompanyDto};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

/// Создание компании
pub async fn create(dto: CompanyDto) -> ServiceResult<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("COMP-{}", &Uuid::new_v4().to_string()[..8]));
    let mut aggregate = Company::new_for_insert(code, &dto);
    aggregate.validate()?;
    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    activity_log::record(Company::collection_name(), &id.to_string(), actions::CREATE, None).await;
    Ok(id)
}

/// Обновление компании
pub async fn update(dto: CompanyDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Company::collection_name(), id))?;

    aggregate.update(&dto);
    aggregate.validate()?;
    aggregate.before_write();
    repository::update(&aggregate).await?;
    activity_log::record(Company::collection_name(), &id.to_string(), actions::UPDATE, None).await;
    Ok(())
}

/// Мягкое удаление
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        activity_log::record(Company::collection_name(), &id.to_string(), actions::DELETE, None)
            .await;
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Company>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<Company>> {
    Ok(repository::list_all().await?)
}
