use contracts::domain::a013_task::aggregate::{Task, TaskDto};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;
use contracts::enums::task_enums::TaskStatus;

use super::repository;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

/// Создание задачи
pub async fn create(dto: TaskDto) -> ServiceResult<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("TASK-{}", &Uuid::new_v4().to_string()[..8]));
    let mut aggregate = Task::new_for_insert(code, &dto);
    aggregate.validate()?;
    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    activity_log::record(Task::collection_name(), &id.to_string(), actions::CREATE, None).await;
    Ok(id)
}

/// Обновление задачи
pub async fn update(dto: TaskDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Task::collection_name(), id))?;

    aggregate.update(&dto);
    aggregate.validate()?;
    aggregate.before_write();
    repository::update(&aggregate).await?;
    activity_log::record(Task::collection_name(), &id.to_string(), actions::UPDATE, None).await;
    Ok(())
}

/// Мягкое удаление
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    let deleted = repository::soft_delete(id).await?;
    if deleted {
        activity_log::record(Task::collection_name(), &id.to_string(), actions::DELETE, None)
            .await;
    }
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Task>> {
    Ok(repository::get_by_id(id).await?)
}

/// Задачи, опционально отфильтрованные по процессу
pub async fn list(
    individual_process_id: Option<&str>,
    main_process_id: Option<&str>,
) -> ServiceResult<Vec<Task>> {
    Ok(repository::list(individual_process_id, main_process_id).await?)
}

/// Отметить задачу выполненной
pub async fn complete(id: Uuid) -> ServiceResult<Task> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .filter(|t| !t.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found(Task::collection_name(), id))?;

    if aggregate.status != TaskStatus::Completed {
        aggregate.set_status(TaskStatus::Completed);
        aggregate.before_write();
        repository::update(&aggregate).await?;
        activity_log::record(
            Task::collection_name(),
            &id.to_string(),
            actions::UPDATE,
            Some("completed".to_string()),
        )
        .await;
    }
    Ok(aggregate)
}
