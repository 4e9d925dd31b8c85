use contracts::domain::a005_passport::aggregate::{Passport, PassportDto};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

/// Создание паспорта
pub async fn create(dto: PassportDto) -> ServiceResult<Uuid> {
    let mut aggregate = Passport::new_for_insert(&dto);
    aggregate.validate()?;
    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    activity_log::record(Passport::collection_name(), &id.to_string(), actions::CREATE, None).await;
    Ok(id)
}

/// Обновление паспорта
pub async fn update(dto: PassportDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Passport::collection_name(), id))?;

    aggregate.update(&dto);
    aggregate.validate()?;
    aggregate.before_write();
    repository::update(&aggregate).await?;
    activity_log::record(Passport::collection_name(), &id.to_string(), actions::UPDATE, None).await;
    Ok(())
}

/// Мягкое удаление
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        activity_log::record(Passport::collection_name(), &id.to_string(), actions::DELETE, None)
            .await;
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Passport>> {
    Ok(repository::get_by_id(id).await?)
}

/// Паспорта, опционально отфильтрованные по владельцу
pub async fn list(person_id: Option<&str>) -> ServiceResult<Vec<Passport>> {
    Ok(repository::list(person_id).await?)
}
