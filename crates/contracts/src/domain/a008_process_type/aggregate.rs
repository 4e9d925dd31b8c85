use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{require, validate_optional_ref, ValidationError};

crate::aggregate_id!(
    /// Уникальный идентификатор типа процесса
    ProcessTypeId
);

/// Тип иммиграционного процесса (например, "Autorização de residência")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessType {
    #[serde(flatten)]
    pub base: BaseAggregate<ProcessTypeId>,

    /// Правовое основание по умолчанию, ссылка на a007_legal_framework
    pub legal_framework_id: Option<String>,

    pub sort_order: i32,
    pub is_active: bool,
}

impl ProcessType {
    pub fn new_for_insert(code: String, dto: &ProcessTypeDto) -> Self {
        let mut base = BaseAggregate::new(ProcessTypeId::new_v4(), code, dto.description.clone());
        base.comment = dto.comment.clone();
        Self {
            base,
            legal_framework_id: dto.legal_framework_id.clone(),
            sort_order: dto.sort_order.unwrap_or(0),
            is_active: dto.is_active.unwrap_or(true),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &ProcessTypeDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.legal_framework_id = dto.legal_framework_id.clone();
        if let Some(sort_order) = dto.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        validate_optional_ref("legal_framework_id", self.legal_framework_id.as_deref())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for ProcessType {
    type Id = ProcessTypeId;

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
        "a008"
    }

    fn collection_name() -> &'static str {
        "process_type"
    }

    fn element_name() -> &'static str {
        "Тип процесса"
    }

    fn list_name() -> &'static str {
        "Типы процессов"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcessTypeDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub legal_framework_id: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub comment: Option<String>,
}
