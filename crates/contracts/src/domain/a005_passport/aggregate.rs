use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{
    parse_iso_date, require, validate_optional_ref, validate_ref, ValidationError,
};

crate::aggregate_id!(
    /// Уникальный идентификатор паспорта
    PassportId
);

/// Паспорт физического лица. `base.code`: номер паспорта.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passport {
    #[serde(flatten)]
    pub base: BaseAggregate<PassportId>,

    /// Владелец, ссылка на a004_person
    pub person_id: String,

    /// Страна выдачи, ссылка на a001_country
    pub issuing_country_id: Option<String>,

    /// Дата выдачи (YYYY-MM-DD)
    pub issue_date: String,

    /// Дата окончания действия (YYYY-MM-DD)
    pub expiry_date: String,

    pub is_active: bool,
}

impl Passport {
    pub fn new_for_insert(dto: &PassportDto) -> Self {
        let description = dto
            .description
            .clone()
            .unwrap_or_else(|| format!("Passport {}", dto.number));
        let mut base = BaseAggregate::new(PassportId::new_v4(), dto.number.clone(), description);
        base.comment = dto.comment.clone();
        Self {
            base,
            person_id: dto.person_id.clone(),
            issuing_country_id: dto.issuing_country_id.clone(),
            issue_date: dto.issue_date.clone(),
            expiry_date: dto.expiry_date.clone(),
            is_active: dto.is_active.unwrap_or(true),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &PassportDto) {
        self.base.code = dto.number.clone();
        if let Some(description) = &dto.description {
            self.base.description = description.clone();
        }
        self.base.comment = dto.comment.clone();
        self.person_id = dto.person_id.clone();
        self.issuing_country_id = dto.issuing_country_id.clone();
        self.issue_date = dto.issue_date.clone();
        self.expiry_date = dto.expiry_date.clone();
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("number", &self.base.code)?;
        validate_ref("person_id", &self.person_id)?;
        validate_optional_ref("issuing_country_id", self.issuing_country_id.as_deref())?;
        let issued = parse_iso_date("issue_date", &self.issue_date)?;
        let expires = parse_iso_date("expiry_date", &self.expiry_date)?;
        if expires <= issued {
            return Err(ValidationError::invalid(
                "expiry_date",
                "must be after issue_date",
            ));
        }
        Ok(())
    }

    /// Паспорт просрочен на указанную дату
    pub fn is_expired_on(&self, date: chrono::NaiveDate) -> bool {
        parse_iso_date("expiry_date", &self.expiry_date)
            .map(|expires| expires < date)
            .unwrap_or(false)
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Passport {
    type Id = PassportId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "passport"
    }

    fn element_name() -> &'static str {
        "Паспорт"
    }

    fn list_name() -> &'static str {
        "Паспорта"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PassportDto {
    pub id: Option<String>,
    pub number: String,
    pub description: Option<String>,
    pub person_id: String,
    pub issuing_country_id: Option<String>,
    pub issue_date: String,
    pub expiry_date: String,
    pub is_active: Option<bool>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dto() -> PassportDto {
        PassportDto {
            number: "AB123456".into(),
            person_id: uuid::Uuid::new_v4().to_string(),
            issue_date: "2020-01-10".into(),
            expiry_date: "2030-01-09".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dates_must_be_ordered() {
        let p = Passport::new_for_insert(&dto());
        assert!(p.validate().is_ok());
        assert!(p.is_active);
        assert_eq!(p.base.description, "Passport AB123456");

        let mut d = dto();
        d.expiry_date = "2019-01-01".into();
        assert!(Passport::new_for_insert(&d).validate().is_err());
    }

    #[test]
    fn test_is_expired_on() {
        let p = Passport::new_for_insert(&dto());
        assert!(!p.is_expired_on(NaiveDate::from_ymd_opt(2029, 12, 31).unwrap()));
        assert!(p.is_expired_on(NaiveDate::from_ymd_opt(2030, 1, 10).unwrap()));
    }
}
