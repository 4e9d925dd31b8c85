use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{digit_count, require, validate_optional_ref, ValidationError};

crate::aggregate_id!(
    /// Уникальный идентификатор компании
    CompanyId
);

/// Компания-заявитель (работодатель иностранных сотрудников)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(flatten)]
    pub base: BaseAggregate<CompanyId>,

    /// CNPJ (14 цифр, маска допускается)
    pub tax_id: Option<String>,

    /// Ссылка на город (a002_city)
    pub city_id: Option<String>,

    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Company {
    pub fn new_for_insert(code: String, dto: &CompanyDto) -> Self {
        let mut base = BaseAggregate::new(CompanyId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            tax_id: dto.tax_id.clone(),
            city_id: dto.city_id.clone(),
            address: dto.address.clone(),
            email: dto.email.clone(),
            phone: dto.phone.clone(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &CompanyDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.tax_id = dto.tax_id.clone();
        self.city_id = dto.city_id.clone();
        self.address = dto.address.clone();
        self.email = dto.email.clone();
        self.phone = dto.phone.clone();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        if let Some(tax_id) = self.tax_id.as_deref().filter(|v| !v.trim().is_empty()) {
            if digit_count(tax_id) != 14 {
                return Err(ValidationError::invalid("tax_id", "CNPJ must contain 14 digits"));
            }
        }
        if let Some(email) = self.email.as_deref().filter(|v| !v.trim().is_empty()) {
            if !email.contains('@') {
                return Err(ValidationError::invalid("email", "missing '@'"));
            }
        }
        validate_optional_ref("city_id", self.city_id.as_deref())?;
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Company {
    type Id = CompanyId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "company"
    }

    fn element_name() -> &'static str {
        "Компания"
    }

    fn list_name() -> &'static str {
        "Компании"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub tax_id: Option<String>,
    pub city_id: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnpj_validation() {
        let mut dto = CompanyDto {
            description: "Acme Brasil Ltda".into(),
            tax_id: Some("12.345.678/0001-90".into()),
            ..Default::default()
        };
        assert!(Company::new_for_insert("CMP-001".into(), &dto).validate().is_ok());

        dto.tax_id = Some("12345".into());
        assert!(Company::new_for_insert("CMP-001".into(), &dto).validate().is_err());
    }
}
