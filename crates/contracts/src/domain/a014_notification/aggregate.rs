use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{require, ValidationError};

crate::aggregate_id!(
    /// Уникальный идентификатор уведомления
    NotificationId
);

/// Уведомление пользователю. `base.description`: заголовок.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(flatten)]
    pub base: BaseAggregate<NotificationId>,

    pub message: String,

    /// Получатель; `None`: уведомление для всех
    pub recipient: Option<String>,

    /// Сущность, к которой относится уведомление (collection_name)
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,

    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new_for_insert(code: String, dto: &NotificationDto) -> Self {
        let mut base = BaseAggregate::new(NotificationId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            message: dto.message.clone(),
            recipient: dto.recipient.clone(),
            entity_type: dto.entity_type.clone(),
            entity_id: dto.entity_id.clone(),
            is_read: false,
            read_at: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &NotificationDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.message = dto.message.clone();
        self.recipient = dto.recipient.clone();
        self.entity_type = dto.entity_type.clone();
        self.entity_id = dto.entity_id.clone();
    }

    pub fn mark_read(&mut self) {
        if !self.is_read {
            self.is_read = true;
            self.read_at = Some(Utc::now());
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        require("message", &self.message)?;
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Notification {
    type Id = NotificationId;

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
        "a014"
    }

    fn collection_name() -> &'static str {
        "notification"
    }

    fn element_name() -> &'static str {
        "Уведомление"
    }

    fn list_name() -> &'static str {
        "Уведомления"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub message: String,
    pub recipient: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut n = Notification::new_for_insert(
            "NTF-1".into(),
            &NotificationDto {
                description: "Status changed".into(),
                message: "IP-1: approved".into(),
                ..Default::default()
            },
        );
        assert!(n.validate().is_ok());
        n.mark_read();
        let first = n.read_at;
        n.mark_read();
        assert!(n.is_read);
        assert_eq!(n.read_at, first);
    }
}
