use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{
    digit_count, require, validate_optional_date, validate_optional_ref, ValidationError,
};

crate::aggregate_id!(
    /// Уникальный идентификатор физического лица
    PersonId
);

/// Физическое лицо (иностранный сотрудник или член семьи).
/// `base.description`: полное имя.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(flatten)]
    pub base: BaseAggregate<PersonId>,

    /// Дата рождения (YYYY-MM-DD)
    pub birth_date: Option<String>,

    /// Гражданство, ссылка на a001_country
    pub nationality_id: Option<String>,

    pub email: Option<String>,
    pub phone: Option<String>,

    /// CPF (11 цифр)
    pub cpf: Option<String>,
}

impl Person {
    pub fn new_for_insert(code: String, dto: &PersonDto) -> Self {
        let mut base = BaseAggregate::new(PersonId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            birth_date: dto.birth_date.clone(),
            nationality_id: dto.nationality_id.clone(),
            email: dto.email.clone(),
            phone: dto.phone.clone(),
            cpf: dto.cpf.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &PersonDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.birth_date = dto.birth_date.clone();
        self.nationality_id = dto.nationality_id.clone();
        self.email = dto.email.clone();
        self.phone = dto.phone.clone();
        self.cpf = dto.cpf.clone();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        validate_optional_date("birth_date", self.birth_date.as_deref())?;
        validate_optional_ref("nationality_id", self.nationality_id.as_deref())?;
        if let Some(email) = self.email.as_deref().filter(|v| !v.trim().is_empty()) {
            if !email.contains('@') {
                return Err(ValidationError::invalid("email", "missing '@'"));
            }
        }
        if let Some(cpf) = self.cpf.as_deref().filter(|v| !v.trim().is_empty()) {
            if digit_count(cpf) != 11 {
                return Err(ValidationError::invalid("cpf", "CPF must contain 11 digits"));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Person {
    type Id = PersonId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "person"
    }

    fn element_name() -> &'static str {
        "Физическое лицо"
    }

    fn list_name() -> &'static str {
        "Физические лица"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersonDto {
    pub id: Option<String>,
    pub code: Option<String>,
    /// Полное имя
    pub description: String,
    pub birth_date: Option<String>,
    pub nationality_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> PersonDto {
        PersonDto {
            description: "John Smith".into(),
            birth_date: Some("1990-05-17".into()),
            email: Some("john@example.com".into()),
            cpf: Some("123.456.789-09".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_person() {
        assert!(Person::new_for_insert("PRS-1".into(), &dto()).validate().is_ok());
    }

    #[test]
    fn test_invalid_fields() {
        let mut d = dto();
        d.birth_date = Some("17/05/1990".into());
        assert!(Person::new_for_insert("PRS-1".into(), &d).validate().is_err());

        let mut d = dto();
        d.email = Some("john.example.com".into());
        assert!(Person::new_for_insert("PRS-1".into(), &d).validate().is_err());

        let mut d = dto();
        d.cpf = Some("1234".into());
        assert!(Person::new_for_insert("PRS-1".into(), &d).validate().is_err());
    }
}
