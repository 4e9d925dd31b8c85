use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{
    require, validate_optional_date, validate_optional_ref, validate_ref, ValidationError,
};
use crate::shared::workflow::IndividualProcessFieldsPatch;

crate::aggregate_id!(
    /// Уникальный идентификатор индивидуального процесса
    IndividualProcessId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Индивидуальный процесс: дело конкретного человека внутри основного процесса.
///
/// Текущий статус определяется историей (a012). `case_status_id`: кэш
/// активной записи истории, обновляется сервисом при каждом изменении.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualProcess {
    #[serde(flatten)]
    pub base: BaseAggregate<IndividualProcessId>,

    /// Ссылка на a010_main_process
    pub main_process_id: String,

    /// Ссылка на a004_person
    pub person_id: String,

    /// Кэш текущего статуса (a009_case_status)
    pub case_status_id: Option<String>,

    // Заполняемые поля (см. FILLABLE_FIELDS)
    pub passport_id: Option<String>,
    pub process_type_id: Option<String>,
    pub legal_framework_id: Option<String>,
    pub protocol_number: Option<String>,
    pub rnm_number: Option<String>,
    pub rnm_deadline: Option<String>,
    pub appointment_date: Option<String>,
    pub deadline_date: Option<String>,
    pub cbo_code: Option<String>,
    pub salary: Option<f64>,
    pub notes: Option<String>,
}

impl IndividualProcess {
    pub fn new_for_insert(code: String, dto: &IndividualProcessDto) -> Self {
        let mut base =
            BaseAggregate::new(IndividualProcessId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            main_process_id: dto.main_process_id.clone(),
            person_id: dto.person_id.clone(),
            case_status_id: None,
            passport_id: None,
            process_type_id: None,
            legal_framework_id: None,
            protocol_number: None,
            rnm_number: None,
            rnm_deadline: None,
            appointment_date: None,
            deadline_date: None,
            cbo_code: None,
            salary: None,
            notes: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновление реквизитов процесса. Заполняемые поля меняются только
    /// через `apply_patch` с проверкой по текущему статусу.
    pub fn update(&mut self, dto: &IndividualProcessDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.main_process_id = dto.main_process_id.clone();
        self.person_id = dto.person_id.clone();
    }

    /// Применить патч заполняемых полей (без проверки статуса)
    pub fn apply_patch(&mut self, patch: &IndividualProcessFieldsPatch) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }
        set(&mut self.passport_id, &patch.passport_id);
        set(&mut self.process_type_id, &patch.process_type_id);
        set(&mut self.legal_framework_id, &patch.legal_framework_id);
        set(&mut self.protocol_number, &patch.protocol_number);
        set(&mut self.rnm_number, &patch.rnm_number);
        set(&mut self.rnm_deadline, &patch.rnm_deadline);
        set(&mut self.appointment_date, &patch.appointment_date);
        set(&mut self.deadline_date, &patch.deadline_date);
        set(&mut self.cbo_code, &patch.cbo_code);
        set(&mut self.salary, &patch.salary);
        set(&mut self.notes, &patch.notes);
    }

    /// Перенос даты записи истории в поле процесса (см. `cascade_date_field`)
    pub fn set_date_field(&mut self, field: &str, date: &str) -> bool {
        let target = match field {
            "appointment_date" => &mut self.appointment_date,
            "deadline_date" => &mut self.deadline_date,
            "rnm_deadline" => &mut self.rnm_deadline,
            _ => return false,
        };
        *target = Some(date.to_string());
        true
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("code", &self.base.code)?;
        validate_ref("main_process_id", &self.main_process_id)?;
        validate_ref("person_id", &self.person_id)?;
        validate_optional_ref("passport_id", self.passport_id.as_deref())?;
        validate_optional_ref("process_type_id", self.process_type_id.as_deref())?;
        validate_optional_ref("legal_framework_id", self.legal_framework_id.as_deref())?;
        validate_optional_date("rnm_deadline", self.rnm_deadline.as_deref())?;
        validate_optional_date("appointment_date", self.appointment_date.as_deref())?;
        validate_optional_date("deadline_date", self.deadline_date.as_deref())?;
        if let Some(salary) = self.salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err(ValidationError::invalid("salary", "must be a non-negative number"));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for IndividualProcess {
    type Id = IndividualProcessId;

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
        "a011"
    }

    fn collection_name() -> &'static str {
        "individual_process"
    }

    fn element_name() -> &'static str {
        "Индивидуальный процесс"
    }

    fn list_name() -> &'static str {
        "Индивидуальные процессы"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IndividualProcessDto {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub description: String,
    pub main_process_id: String,
    pub person_id: String,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process() -> IndividualProcess {
        IndividualProcess::new_for_insert(
            "IP-1".into(),
            &IndividualProcessDto {
                main_process_id: uuid::Uuid::new_v4().to_string(),
                person_id: uuid::Uuid::new_v4().to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_apply_patch_sets_only_given_fields() {
        let mut p = process();
        p.notes = Some("keep".into());
        p.apply_patch(&IndividualProcessFieldsPatch {
            rnm_number: Some("V123456-7".into()),
            salary: Some(15000.0),
            ..Default::default()
        });
        assert_eq!(p.rnm_number.as_deref(), Some("V123456-7"));
        assert_eq!(p.salary, Some(15000.0));
        assert_eq!(p.notes.as_deref(), Some("keep"));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_set_date_field() {
        let mut p = process();
        assert!(p.set_date_field("appointment_date", "2025-03-10"));
        assert_eq!(p.appointment_date.as_deref(), Some("2025-03-10"));
        assert!(!p.set_date_field("salary", "2025-03-10"));
    }

    #[test]
    fn test_invalid_patch_values_fail_validation() {
        let mut p = process();
        p.apply_patch(&IndividualProcessFieldsPatch {
            deadline_date: Some("next week".into()),
            ..Default::default()
        });
        assert!(p.validate().is_err());

        let mut p = process();
        p.salary = Some(-1.0);
        assert!(p.validate().is_err());
    }
}
