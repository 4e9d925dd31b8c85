use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::case_status_category::CaseStatusCategory;
use crate::shared::validation::{is_hex_color, is_snake_case, require, ValidationError};
use crate::shared::workflow::validate_fillable_fields;

crate::aggregate_id!(
    /// Уникальный идентификатор статуса дела
    CaseStatusId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Статус дела из каталога, который ведёт администратор.
///
/// `base.code`: стабильный ключ статуса (lowercase snake_case), он же ключ
/// в таблице переходов. `base.description`: отображаемое имя ("RNM",
/// "Em Trâmite").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStatus {
    #[serde(flatten)]
    pub base: BaseAggregate<CaseStatusId>,

    pub category: CaseStatusCategory,

    /// Цвет бейджа, `#RRGGBB`
    pub color: String,

    #[serde(rename = "sortOrder")]
    pub sort_order: i32,

    /// Поля процесса, которые можно редактировать в этом статусе
    #[serde(rename = "fillableFields")]
    pub fillable_fields: Vec<String>,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl CaseStatus {
    pub fn new_for_insert(dto: &CaseStatusDto) -> Self {
        let mut base = BaseAggregate::new(
            CaseStatusId::new_v4(),
            dto.code.trim().to_string(),
            dto.description.clone(),
        );
        base.comment = dto.comment.clone();
        Self {
            base,
            category: dto.category,
            color: dto.color.clone(),
            sort_order: dto.sort_order,
            fillable_fields: dto.fillable_fields.clone(),
            is_active: dto.is_active.unwrap_or(true),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &CaseStatusDto) {
        self.base.code = dto.code.trim().to_string();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.category = dto.category;
        self.color = dto.color.clone();
        self.sort_order = dto.sort_order;
        self.fillable_fields = dto.fillable_fields.clone();
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        if !is_snake_case(&self.base.code) {
            return Err(ValidationError::invalid(
                "code",
                "expected lowercase snake_case",
            ));
        }
        if !is_hex_color(&self.color) {
            return Err(ValidationError::invalid("color", "expected #RRGGBB"));
        }
        validate_fillable_fields(&self.fillable_fields)
    }

    pub fn before_write(&mut self) {
        self.fillable_fields.sort();
        self.fillable_fields.dedup();
        self.base.touch();
    }
}

impl AggregateRoot for CaseStatus {
    type Id = CaseStatusId;

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
        "a009"
    }

    fn collection_name() -> &'static str {
        "case_status"
    }

    fn element_name() -> &'static str {
        "Статус дела"
    }

    fn list_name() -> &'static str {
        "Статусы дел"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStatusDto {
    pub id: Option<String>,
    pub code: String,
    /// Отображаемое имя
    pub description: String,
    pub category: CaseStatusCategory,
    pub color: String,
    #[serde(rename = "sortOrder", default)]
    pub sort_order: i32,
    #[serde(rename = "fillableFields", default)]
    pub fillable_fields: Vec<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CaseStatusDto {
        CaseStatusDto {
            id: None,
            code: "rnm_scheduled".into(),
            description: "RNM agendado".into(),
            category: CaseStatusCategory::InProgress,
            color: "#1E88E5".into(),
            sort_order: 90,
            fillable_fields: vec!["appointment_date".into(), "rnm_number".into()],
            is_active: None,
            comment: None,
        }
    }

    #[test]
    fn test_valid_case_status() {
        let status = CaseStatus::new_for_insert(&dto());
        assert!(status.validate().is_ok());
        assert!(status.is_active);
        assert_eq!(status.fillable_fields, vec!["appointment_date", "rnm_number"]);
    }

    #[test]
    fn test_unknown_fillable_field_rejected() {
        let mut d = dto();
        d.fillable_fields.push("passport_photo".into());
        assert_eq!(
            CaseStatus::new_for_insert(&d).validate(),
            Err(ValidationError::UnknownFillableField("passport_photo".into()))
        );
    }

    #[test]
    fn test_code_and_color_format() {
        let mut d = dto();
        d.code = "RNM Scheduled".into();
        assert!(CaseStatus::new_for_insert(&d).validate().is_err());

        let mut d = dto();
        d.color = "blue".into();
        assert!(CaseStatus::new_for_insert(&d).validate().is_err());
    }

    #[test]
    fn test_dto_json_shape() {
        let json = r##"{
            "code": "em_tramite",
            "description": "Em Trâmite",
            "category": "in_progress",
            "color": "#FFA000",
            "fillableFields": ["protocol_number"]
        }"##;
        let d: CaseStatusDto = serde_json::from_str(json).unwrap();
        assert_eq!(d.sort_order, 0);
        assert_eq!(d.category, CaseStatusCategory::InProgress);
        assert!(CaseStatus::new_for_insert(&d).validate().is_ok());
    }
}
