use contracts::domain::a014_notification::aggregate::{Notification, NotificationDto};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

/// Создание уведомления
pub async fn create(dto: NotificationDto) -> ServiceResult<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("NTF-{}", &Uuid::new_v4().to_string()[..8]));
    let mut aggregate = Notification::new_for_insert(code, &dto);
    aggregate.validate()?;
    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    activity_log::record(Notification::collection_name(), &id.to_string(), actions::CREATE, None).await;
    Ok(id)
}

/// Обновление уведомления
pub async fn update(dto: NotificationDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Notification::collection_name(), id))?;

    aggregate.update(&dto);
    aggregate.validate()?;
    aggregate.before_write();
    repository::update(&aggregate).await?;
    activity_log::record(Notification::collection_name(), &id.to_string(), actions::UPDATE, None).await;
    Ok(())
}

/// Мягкое удаление
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        activity_log::record(Notification::collection_name(), &id.to_string(), actions::DELETE, None)
            .await;
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Notification>> {
    Ok(repository::get_by_id(id).await?)
}

/// Уведомления получателя; `unread_only` оставляет только непрочитанные
pub async fn list(recipient: Option<&str>, unread_only: bool) -> ServiceResult<Vec<Notification>> {
    Ok(repository::list(recipient, unread_only).await?)
}

/// Отметить уведомление прочитанным
pub async fn mark_read(id: Uuid) -> ServiceResult<Notification> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .filter(|n| !n.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found(Notification::collection_name(), id))?;

    if !aggregate.is_read {
        aggregate.mark_read();
        aggregate.before_write();
        repository::update(&aggregate).await?;
    }
    Ok(aggregate)
}

/// Уведомление о смене статуса процесса; пишется в той же транзакции
pub async fn notify_with<C: sea_orm::ConnectionTrait>(
    db: &C,
    title: String,
    message: String,
    entity_type: &str,
    entity_id: &str,
) -> ServiceResult<Uuid> {
    let dto = NotificationDto {
        id: None,
        code: None,
        description: title,
        message,
        recipient: None,
        entity_type: Some(entity_type.to_string()),
        entity_id: Some(entity_id.to_string()),
        comment: None,
    };
    let code = format!("NTF-{}", &Uuid::new_v4().to_string()[..8]);
    let mut aggregate = Notification::new_for_insert(code, &dto);
    aggregate.validate()?;
    aggregate.before_write();
    Ok(repository::insert_with(db, &aggregate).await?)
}
