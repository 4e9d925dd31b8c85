use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::task_enums::{TaskPriority, TaskStatus};
use crate::shared::validation::{
    require, validate_optional_date, validate_optional_ref, ValidationError,
};

crate::aggregate_id!(
    /// Уникальный идентификатор задачи
    TaskId
);

/// Задача по процессу. `base.description`: заголовок задачи.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(flatten)]
    pub base: BaseAggregate<TaskId>,

    pub individual_process_id: Option<String>,
    pub main_process_id: Option<String>,

    /// Исполнитель (идентификатор пользователя провайдера авторизации)
    pub assigned_to: Option<String>,

    /// Срок (YYYY-MM-DD)
    pub due_date: Option<String>,

    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new_for_insert(code: String, dto: &TaskDto) -> Self {
        let mut base = BaseAggregate::new(TaskId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            individual_process_id: dto.individual_process_id.clone(),
            main_process_id: dto.main_process_id.clone(),
            assigned_to: dto.assigned_to.clone(),
            due_date: dto.due_date.clone(),
            priority: dto.priority.unwrap_or_default(),
            status: dto.status.unwrap_or_default(),
            completed_at: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &TaskDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.individual_process_id = dto.individual_process_id.clone();
        self.main_process_id = dto.main_process_id.clone();
        self.assigned_to = dto.assigned_to.clone();
        self.due_date = dto.due_date.clone();
        if let Some(priority) = dto.priority {
            self.priority = priority;
        }
        if let Some(status) = dto.status {
            self.set_status(status);
        }
    }

    /// Смена состояния с отметкой времени завершения
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.completed_at = match status {
            TaskStatus::Completed => self.completed_at.or_else(|| Some(Utc::now())),
            _ => None,
        };
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        validate_optional_ref("individual_process_id", self.individual_process_id.as_deref())?;
        validate_optional_ref("main_process_id", self.main_process_id.as_deref())?;
        validate_optional_date("due_date", self.due_date.as_deref())?;
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Task {
    type Id = TaskId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a013"
    }

    fn collection_name() -> &'static str {
        "task"
    }

    fn element_name() -> &'static str {
        "Задача"
    }

    fn list_name() -> &'static str {
        "Задачи"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub individual_process_id: Option<String>,
    pub main_process_id: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_timestamp() {
        let mut t = Task::new_for_insert(
            "TSK-1".into(),
            &TaskDto {
                description: "Collect criminal record certificate".into(),
                due_date: Some("2025-05-01".into()),
                ..Default::default()
            },
        );
        assert!(t.validate().is_ok());
        assert_eq!(t.status, TaskStatus::Todo);
        assert_eq!(t.priority, TaskPriority::Medium);

        t.set_status(TaskStatus::Completed);
        let done_at = t.completed_at;
        assert!(done_at.is_some());
        t.set_status(TaskStatus::Completed);
        assert_eq!(t.completed_at, done_at);

        t.set_status(TaskStatus::InProgress);
        assert!(t.completed_at.is_none());
    }
}
