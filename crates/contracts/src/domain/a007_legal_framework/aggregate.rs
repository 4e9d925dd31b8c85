use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::field_registry::{validate_requirements, FieldRequirement};
use crate::shared::validation::{require, ValidationError};

crate::aggregate_id!(
    /// Уникальный идентификатор правового основания
    LegalFrameworkId
);

/// Правовое основание (нормативный акт, по которому подаётся процесс)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalFramework {
    #[serde(flatten)]
    pub base: BaseAggregate<LegalFrameworkId>,

    /// Ссылка на норму (например, "RN 02/2017")
    pub law_reference: Option<String>,

    /// Сведения, которые нужно собрать для процессов по этому основанию
    pub info_requirements: Vec<FieldRequirement>,

    pub is_active: bool,
}

impl LegalFramework {
    pub fn new_for_insert(code: String, dto: &LegalFrameworkDto) -> Self {
        let mut base =
            BaseAggregate::new(LegalFrameworkId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            law_reference: dto.law_reference.clone(),
            info_requirements: dto.info_requirements.clone(),
            is_active: dto.is_active.unwrap_or(true),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &LegalFrameworkDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.law_reference = dto.law_reference.clone();
        self.info_requirements = dto.info_requirements.clone();
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        validate_requirements(&self.info_requirements)
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for LegalFramework {
    type Id = LegalFrameworkId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "legal_framework"
    }

    fn element_name() -> &'static str {
        "Правовое основание"
    }

    fn list_name() -> &'static str {
        "Правовые основания"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LegalFrameworkDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub law_reference: Option<String>,
    #[serde(default)]
    pub info_requirements: Vec<FieldRequirement>,
    pub is_active: Option<bool>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::field_registry::RegistryEntity;

    #[test]
    fn test_info_requirements_must_be_registered() {
        let mut dto = LegalFrameworkDto {
            description: "Autorização de residência para trabalho".into(),
            law_reference: Some("RN 02/2017".into()),
            info_requirements: vec![FieldRequirement {
                entity: RegistryEntity::IndividualProcess,
                field_path: "cbo_code".into(),
                is_required: true,
            }],
            ..Default::default()
        };
        assert!(LegalFramework::new_for_insert("LF-1".into(), &dto).validate().is_ok());

        dto.info_requirements[0].field_path = "shoe_size".into();
        assert!(matches!(
            LegalFramework::new_for_insert("LF-1".into(), &dto).validate(),
            Err(ValidationError::UnknownRegistryField { .. })
        ));
    }
}
