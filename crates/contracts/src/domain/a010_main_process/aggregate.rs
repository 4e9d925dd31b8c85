use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{
    require, validate_optional_date, validate_optional_ref, validate_ref, ValidationError,
};
use crate::shared::workflow::{
    allowed_next_statuses, check_status_transition, ProcessKind, StatusTransitionError,
    INITIAL_MAIN_STATUS,
};

crate::aggregate_id!(
    /// Уникальный идентификатор основного процесса
    MainProcessId
);

/// Основной процесс: обращение компании, объединяющее индивидуальные процессы
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainProcess {
    #[serde(flatten)]
    pub base: BaseAggregate<MainProcessId>,

    /// Компания-заявитель, ссылка на a003_company
    pub company_id: String,

    /// Ссылка на a008_process_type
    pub process_type_id: Option<String>,

    /// Код статуса из `MAIN_STATUS_TRANSITIONS`
    pub status: String,

    /// Дата обращения (YYYY-MM-DD)
    pub requested_at: Option<String>,

    pub notes: Option<String>,
}

impl MainProcess {
    pub fn new_for_insert(code: String, dto: &MainProcessDto) -> Self {
        let mut base = BaseAggregate::new(MainProcessId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            company_id: dto.company_id.clone(),
            process_type_id: dto.process_type_id.clone(),
            status: INITIAL_MAIN_STATUS.to_string(),
            requested_at: dto.requested_at.clone(),
            notes: dto.notes.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновление реквизитов. Статус меняется только через `change_status`.
    pub fn update(&mut self, dto: &MainProcessDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.company_id = dto.company_id.clone();
        self.process_type_id = dto.process_type_id.clone();
        self.requested_at = dto.requested_at.clone();
        self.notes = dto.notes.clone();
    }

    /// Смена статуса по таблице переходов основного процесса
    pub fn change_status(&mut self, new_status: &str) -> Result<(), StatusTransitionError> {
        check_status_transition(&self.status, new_status, ProcessKind::Main)?;
        self.status = new_status.to_string();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        validate_ref("company_id", &self.company_id)?;
        validate_optional_ref("process_type_id", self.process_type_id.as_deref())?;
        validate_optional_date("requested_at", self.requested_at.as_deref())?;
        if allowed_next_statuses(ProcessKind::Main, &self.status).is_none() {
            return Err(ValidationError::UnknownValue {
                field: "status",
                value: self.status.clone(),
            });
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for MainProcess {
    type Id = MainProcessId;

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
        "a010"
    }

    fn collection_name() -> &'static str {
        "main_process"
    }

    fn element_name() -> &'static str {
        "Основной процесс"
    }

    fn list_name() -> &'static str {
        "Основные процессы"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MainProcessDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub company_id: String,
    pub process_type_id: Option<String>,
    pub requested_at: Option<String>,
    pub notes: Option<String>,
    pub comment: Option<String>,
}

/// Запрос на смену статуса основного процесса
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChangeMainStatusRequest {
    pub status: String,
    /// Версия процесса, которую видел клиент (optimistic locking)
    #[serde(default, rename = "expectedVersion")]
    pub expected_version: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process() -> MainProcess {
        MainProcess::new_for_insert(
            "MP-1".into(),
            &MainProcessDto {
                description: "Acme 2025 expats".into(),
                company_id: uuid::Uuid::new_v4().to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_new_process_starts_in_draft() {
        let p = process();
        assert_eq!(p.status, "draft");
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_change_status_follows_table() {
        let mut p = process();
        assert!(p.change_status("in_progress").is_ok());
        let err = p.change_status("draft").unwrap_err();
        assert_eq!(err.from, "in_progress");
        assert_eq!(err.to, "draft");
        assert_eq!(p.status, "in_progress");
        assert!(p.change_status("in_progress").is_ok());
        assert!(p.change_status("completed").is_ok());
        assert!(p.change_status("on_hold").is_err());
    }
}
