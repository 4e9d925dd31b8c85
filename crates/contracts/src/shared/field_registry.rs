//! Реестр полей сущностей для настраиваемых требований
//!
//! Статические списки полей, которые администратор может выбрать при
//! настройке требований к документам (a006) и информационных требований
//! правовых оснований (a007). Данные заданы compile-time константами.

use serde::{Deserialize, Serialize};

use crate::shared::validation::ValidationError;

/// Тип значения поля
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Date,
    Number,
    Reference,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
            Self::Reference => "reference",
        }
    }
}

/// Сущность, поля которой доступны в реестре
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryEntity {
    Person,
    IndividualProcess,
    Passport,
    Company,
}

impl RegistryEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::IndividualProcess => "individual_process",
            Self::Passport => "passport",
            Self::Company => "company",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "person" => Some(Self::Person),
            "individual_process" => Some(Self::IndividualProcess),
            "passport" => Some(Self::Passport),
            "company" => Some(Self::Company),
            _ => None,
        }
    }

    pub fn all() -> Vec<RegistryEntity> {
        vec![
            Self::Person,
            Self::IndividualProcess,
            Self::Passport,
            Self::Company,
        ]
    }
}

/// Описание поля в реестре
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldRegistryEntry {
    pub field_path: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
}

const fn entry(field_path: &'static str, label: &'static str, field_type: FieldType) -> FieldRegistryEntry {
    FieldRegistryEntry {
        field_path,
        label,
        field_type,
    }
}

static PERSON_FIELDS: &[FieldRegistryEntry] = &[
    entry("description", "Full name", FieldType::Text),
    entry("birth_date", "Birth date", FieldType::Date),
    entry("nationality_id", "Nationality", FieldType::Reference),
    entry("email", "E-mail", FieldType::Text),
    entry("phone", "Phone", FieldType::Text),
    entry("cpf", "CPF", FieldType::Text),
];

static INDIVIDUAL_PROCESS_FIELDS: &[FieldRegistryEntry] = &[
    entry("protocol_number", "Protocol number", FieldType::Text),
    entry("rnm_number", "RNM number", FieldType::Text),
    entry("rnm_deadline", "RNM deadline", FieldType::Date),
    entry("appointment_date", "Appointment date", FieldType::Date),
    entry("deadline_date", "Deadline", FieldType::Date),
    entry("cbo_code", "CBO code", FieldType::Text),
    entry("salary", "Salary", FieldType::Number),
];

static PASSPORT_FIELDS: &[FieldRegistryEntry] = &[
    entry("number", "Passport number", FieldType::Text),
    entry("issuing_country_id", "Issuing country", FieldType::Reference),
    entry("issue_date", "Issue date", FieldType::Date),
    entry("expiry_date", "Expiry date", FieldType::Date),
];

static COMPANY_FIELDS: &[FieldRegistryEntry] = &[
    entry("description", "Company name", FieldType::Text),
    entry("tax_id", "CNPJ", FieldType::Text),
    entry("city_id", "City", FieldType::Reference),
    entry("address", "Address", FieldType::Text),
    entry("email", "E-mail", FieldType::Text),
    entry("phone", "Phone", FieldType::Text),
];

/// Поля, доступные для сущности
pub fn fields_for(entity: RegistryEntity) -> &'static [FieldRegistryEntry] {
    match entity {
        RegistryEntity::Person => PERSON_FIELDS,
        RegistryEntity::IndividualProcess => INDIVIDUAL_PROCESS_FIELDS,
        RegistryEntity::Passport => PASSPORT_FIELDS,
        RegistryEntity::Company => COMPANY_FIELDS,
    }
}

pub fn find_field(entity: RegistryEntity, field_path: &str) -> Option<&'static FieldRegistryEntry> {
    fields_for(entity).iter().find(|f| f.field_path == field_path)
}

/// Требование: значение поля сущности должно быть заполнено
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRequirement {
    pub entity: RegistryEntity,
    pub field_path: String,
    #[serde(default)]
    pub is_required: bool,
}

/// Каждое требование должно ссылаться на зарегистрированное поле
pub fn validate_requirements(requirements: &[FieldRequirement]) -> Result<(), ValidationError> {
    for req in requirements {
        if find_field(req.entity, &req.field_path).is_none() {
            return Err(ValidationError::UnknownRegistryField {
                entity: req.entity.as_str().to_string(),
                field_path: req.field_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entity_has_fields() {
        for entity in RegistryEntity::all() {
            assert!(!fields_for(entity).is_empty(), "{}", entity.as_str());
            assert_eq!(RegistryEntity::from_code(entity.as_str()), Some(entity));
        }
    }

    #[test]
    fn test_field_paths_unique_per_entity() {
        for entity in RegistryEntity::all() {
            let fields = fields_for(entity);
            for (i, f) in fields.iter().enumerate() {
                assert!(
                    !fields[i + 1..].iter().any(|o| o.field_path == f.field_path),
                    "duplicate {} in {}",
                    f.field_path,
                    entity.as_str()
                );
            }
        }
    }

    #[test]
    fn test_validate_requirements() {
        let ok = vec![
            FieldRequirement {
                entity: RegistryEntity::Passport,
                field_path: "expiry_date".into(),
                is_required: true,
            },
            FieldRequirement {
                entity: RegistryEntity::Person,
                field_path: "cpf".into(),
                is_required: false,
            },
        ];
        assert!(validate_requirements(&ok).is_ok());

        let bad = vec![FieldRequirement {
            entity: RegistryEntity::Company,
            field_path: "birth_date".into(),
            is_required: true,
        }];
        assert!(matches!(
            validate_requirements(&bad),
            Err(ValidationError::UnknownRegistryField { .. })
        ));
    }

    #[test]
    fn test_find_field() {
        let f = find_field(RegistryEntity::IndividualProcess, "salary").unwrap();
        assert_eq!(f.field_type, FieldType::Number);
        assert!(find_field(RegistryEntity::IndividualProcess, "unknown").is_none());
    }
}
