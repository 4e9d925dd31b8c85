use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::validation::{validate_optional_date, validate_ref, ValidationError};

crate::aggregate_id!(
    /// Уникальный идентификатор записи истории статусов
    IndividualProcessStatusId
);

/// Запись истории статусов индивидуального процесса.
///
/// Записи только добавляются; активной является ровно одна запись процесса.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualProcessStatus {
    pub id: IndividualProcessStatusId,

    /// Ссылка на a011_individual_process
    pub individual_process_id: String,

    /// Ссылка на a009_case_status
    pub case_status_id: String,

    /// Код статуса на момент записи (ключ таблицы переходов)
    pub status_code: String,

    /// Дата события (YYYY-MM-DD), например дата записи на RNM
    pub date: Option<String>,

    pub notes: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl IndividualProcessStatus {
    pub fn new_active(
        individual_process_id: String,
        case_status_id: String,
        status_code: String,
        date: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: IndividualProcessStatusId::new_v4(),
            individual_process_id,
            case_status_id,
            status_code,
            date,
            notes,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn element_name() -> &'static str {
        "Запись истории статусов"
    }

    pub fn collection_name() -> &'static str {
        "individual_process_status"
    }
}

/// Текущая запись истории процесса.
///
/// Берётся последняя активная запись; если активных нет (старые данные),
/// последняя запись по времени создания.
pub fn current_status_record(
    records: &[IndividualProcessStatus],
) -> Option<&IndividualProcessStatus> {
    records
        .iter()
        .filter(|r| r.is_active)
        .max_by_key(|r| r.created_at)
        .or_else(|| records.iter().max_by_key(|r| r.created_at))
}

/// Запрос на добавление записи в историю статусов
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AddStatusRecordDto {
    #[serde(rename = "caseStatusId")]
    pub case_status_id: String,
    pub date: Option<String>,
    pub notes: Option<String>,
    /// Версия процесса, которую видел клиент (optimistic locking)
    #[serde(rename = "expectedVersion")]
    pub expected_version: Option<i32>,
}

impl AddStatusRecordDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_ref("caseStatusId", &self.case_status_id)?;
        validate_optional_date("date", self.date.as_deref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(code: &str, active: bool, minutes: i64) -> IndividualProcessStatus {
        let mut r = IndividualProcessStatus::new_active(
            "p".into(),
            uuid::Uuid::new_v4().to_string(),
            code.into(),
            None,
            None,
        );
        r.is_active = active;
        r.created_at = Utc::now() - Duration::minutes(100) + Duration::minutes(minutes);
        r
    }

    #[test]
    fn test_current_prefers_active_record() {
        let records = vec![
            record("pending_documents", false, 0),
            record("documents_submitted", true, 10),
            record("documents_under_review", false, 20),
        ];
        assert_eq!(
            current_status_record(&records).unwrap().status_code,
            "documents_submitted"
        );
    }

    #[test]
    fn test_current_falls_back_to_latest() {
        let records = vec![
            record("pending_documents", false, 0),
            record("documents_submitted", false, 10),
        ];
        assert_eq!(
            current_status_record(&records).unwrap().status_code,
            "documents_submitted"
        );
        assert!(current_status_record(&[]).is_none());
    }

    #[test]
    fn test_add_dto_validation() {
        let mut dto = AddStatusRecordDto {
            case_status_id: uuid::Uuid::new_v4().to_string(),
            date: Some("2025-04-01".into()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.date = Some("01.04.2025".into());
        assert!(dto.validate().is_err());
        dto.case_status_id = String::new();
        assert_eq!(dto.validate(), Err(ValidationError::Required("caseStatusId")));
    }
}
