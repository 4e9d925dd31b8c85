use contracts::domain::a001_country::aggregate::{Country, CountryDto};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

/// Создание новой страны
pub async fn create(dto: CountryDto) -> ServiceResult<Uuid> {
    let mut aggregate = Country::new_for_insert(
        dto.code,
        dto.description,
        dto.nationality,
        dto.comment,
    );
    aggregate.validate()?;

    if repository::get_by_code(&aggregate.base.code).await?.is_some() {
        return Err(ServiceError::DuplicateCode(aggregate.base.code.clone()));
    }

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    activity_log::record(Country::collection_name(), &id.to_string(), actions::CREATE, None).await;
    Ok(id)
}

/// Обновление существующей страны
pub async fn update(dto: CountryDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Country::collection_name(), id))?;

    aggregate.update(&dto);
    aggregate.validate()?;

    if let Some(other) = repository::get_by_code(&aggregate.base.code).await? {
        if other.base.id != aggregate.base.id {
            return Err(ServiceError::DuplicateCode(aggregate.base.code.clone()));
        }
    }

    aggregate.before_write();
    repository::update(&aggregate).await?;
    activity_log::record(Country::collection_name(), &id.to_string(), actions::UPDATE, None).await;
    Ok(())
}

/// Мягкое удаление страны
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        activity_log::record(Country::collection_name(), &id.to_string(), actions::DELETE, None)
            .await;
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Country>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<Country>> {
    Ok(repository::list_all().await?)
}
