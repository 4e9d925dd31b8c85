use serde::{Deserialize, Serialize};

use crate::shared::field_registry::FieldType;
use crate::shared::validation::ValidationError;

/// Поле индивидуального процесса, которое статус может разрешить к заполнению
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillableField {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
}

/// Закрытый словарь полей для `CaseStatus.fillable_fields`
pub static FILLABLE_FIELDS: &[FillableField] = &[
    FillableField { name: "passport_id", label: "Passport", field_type: FieldType::Reference },
    FillableField { name: "process_type_id", label: "Process type", field_type: FieldType::Reference },
    FillableField { name: "legal_framework_id", label: "Legal framework", field_type: FieldType::Reference },
    FillableField { name: "protocol_number", label: "Protocol number", field_type: FieldType::Text },
    FillableField { name: "rnm_number", label: "RNM number", field_type: FieldType::Text },
    FillableField { name: "rnm_deadline", label: "RNM deadline", field_type: FieldType::Date },
    FillableField { name: "appointment_date", label: "Appointment date", field_type: FieldType::Date },
    FillableField { name: "deadline_date", label: "Deadline", field_type: FieldType::Date },
    FillableField { name: "cbo_code", label: "CBO code", field_type: FieldType::Text },
    FillableField { name: "salary", label: "Salary", field_type: FieldType::Number },
    FillableField { name: "notes", label: "Notes", field_type: FieldType::Text },
];

pub fn is_fillable_field(name: &str) -> bool {
    FILLABLE_FIELDS.iter().any(|f| f.name == name)
}

/// Все имена должны присутствовать в `FILLABLE_FIELDS`
pub fn validate_fillable_fields(names: &[String]) -> Result<(), ValidationError> {
    match names.iter().find(|n| !is_fillable_field(n)) {
        Some(unknown) => Err(ValidationError::UnknownFillableField(unknown.clone())),
        None => Ok(()),
    }
}

/// Изменение заполняемых полей индивидуального процесса.
/// `Some` означает, что поле устанавливается.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndividualProcessFieldsPatch {
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

impl IndividualProcessFieldsPatch {
    /// Имена полей, которые затрагивает патч
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut push = |set: bool, name: &'static str| {
            if set {
                names.push(name);
            }
        };
        push(self.passport_id.is_some(), "passport_id");
        push(self.process_type_id.is_some(), "process_type_id");
        push(self.legal_framework_id.is_some(), "legal_framework_id");
        push(self.protocol_number.is_some(), "protocol_number");
        push(self.rnm_number.is_some(), "rnm_number");
        push(self.rnm_deadline.is_some(), "rnm_deadline");
        push(self.appointment_date.is_some(), "appointment_date");
        push(self.deadline_date.is_some(), "deadline_date");
        push(self.cbo_code.is_some(), "cbo_code");
        push(self.salary.is_some(), "salary");
        push(self.notes.is_some(), "notes");
        names
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }
}

/// Возвращает первое поле патча, которого нет в `allowed`
pub fn enforce_fillable_fields(
    patch: &IndividualProcessFieldsPatch,
    allowed: &[String],
) -> Result<(), &'static str> {
    match patch
        .field_names()
        .into_iter()
        .find(|name| !allowed.iter().any(|a| a == name))
    {
        Some(name) => Err(name),
        None => Ok(()),
    }
}

/// Поле процесса, в которое переносится дата записи истории для статуса
pub fn cascade_date_field(status_code: &str) -> Option<&'static str> {
    match status_code {
        "rnm_scheduled" => Some("appointment_date"),
        "additional_info_requested" => Some("deadline_date"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fillable_fields() {
        let ok = vec!["rnm_number".to_string(), "appointment_date".to_string()];
        assert!(validate_fillable_fields(&ok).is_ok());
        assert!(validate_fillable_fields(&Vec::new()).is_ok());

        let bad = vec!["rnm_number".to_string(), "favourite_colour".to_string()];
        assert_eq!(
            validate_fillable_fields(&bad),
            Err(ValidationError::UnknownFillableField("favourite_colour".into()))
        );
    }

    #[test]
    fn test_patch_field_names_are_registered() {
        let patch = IndividualProcessFieldsPatch {
            passport_id: Some("x".into()),
            process_type_id: Some("x".into()),
            legal_framework_id: Some("x".into()),
            protocol_number: Some("x".into()),
            rnm_number: Some("x".into()),
            rnm_deadline: Some("x".into()),
            appointment_date: Some("x".into()),
            deadline_date: Some("x".into()),
            cbo_code: Some("x".into()),
            salary: Some(1.0),
            notes: Some("x".into()),
        };
        let names = patch.field_names();
        assert_eq!(names.len(), FILLABLE_FIELDS.len());
        assert!(names.iter().all(|n| is_fillable_field(n)));
    }

    #[test]
    fn test_enforce_fillable_fields() {
        let patch = IndividualProcessFieldsPatch {
            rnm_number: Some("V123456-7".into()),
            notes: Some("agendado".into()),
            ..Default::default()
        };
        assert_eq!(
            enforce_fillable_fields(&patch, &["rnm_number".to_string(), "notes".to_string()]),
            Ok(())
        );
        assert_eq!(enforce_fillable_fields(&patch, &["rnm_number".to_string()]), Err("notes"));
        assert_eq!(enforce_fillable_fields(&patch, &Vec::new()), Err("rnm_number"));
        assert!(IndividualProcessFieldsPatch::default().is_empty());
        assert_eq!(enforce_fillable_fields(&IndividualProcessFieldsPatch::default(), &Vec::new()), Ok(()));
    }

    #[test]
    fn test_cascade_date_field() {
        assert_eq!(cascade_date_field("rnm_scheduled"), Some("appointment_date"));
        assert_eq!(cascade_date_field("additional_info_requested"), Some("deadline_date"));
        assert_eq!(cascade_date_field("approved"), None);
    }
}
