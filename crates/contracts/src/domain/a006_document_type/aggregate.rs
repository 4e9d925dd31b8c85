use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::field_registry::{validate_requirements, FieldRequirement};
use crate::shared::validation::{require, ValidationError};

crate::aggregate_id!(
    /// Уникальный идентификатор типа документа
    DocumentTypeId
);

/// Тип документа (например, "Contrato de trabalho", "Certidão de antecedentes")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentType {
    #[serde(flatten)]
    pub base: BaseAggregate<DocumentTypeId>,

    /// Группа документов для UI (personal, company, government...)
    pub category: Option<String>,

    /// Поля сущностей, которые должны быть заполнены для документа
    pub field_requirements: Vec<FieldRequirement>,

    pub is_active: bool,
}

impl DocumentType {
    pub fn new_for_insert(code: String, dto: &DocumentTypeDto) -> Self {
        let mut base = BaseAggregate::new(DocumentTypeId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            category: dto.category.clone(),
            field_requirements: dto.field_requirements.clone(),
            is_active: dto.is_active.unwrap_or(true),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &DocumentTypeDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.category = dto.category.clone();
        self.field_requirements = dto.field_requirements.clone();
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        validate_requirements(&self.field_requirements)
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for DocumentType {
    type Id = DocumentTypeId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "document_type"
    }

    fn element_name() -> &'static str {
        "Тип документа"
    }

    fn list_name() -> &'static str {
        "Типы документов"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocumentTypeDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub category: Option<String>,
    #[serde(default)]
    pub field_requirements: Vec<FieldRequirement>,
    pub is_active: Option<bool>,
    pub comment: Option<String>,
}
