use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{require, ValidationError};

crate::aggregate_id!(
    /// Уникальный идентификатор страны
    CountryId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Страна (code: ISO 3166 alpha-2 или alpha-3)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    #[serde(flatten)]
    pub base: BaseAggregate<CountryId>,

    /// Национальность (например, "Brazilian")
    pub nationality: Option<String>,
}

impl Country {
    pub fn new_for_insert(
        code: String,
        description: String,
        nationality: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(CountryId::new_v4(), code.trim().to_uppercase(), description);
        base.comment = comment;
        Self { base, nationality }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &CountryDto) {
        self.base.code = dto.code.trim().to_uppercase();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.nationality = dto.nationality.clone();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        let code = &self.base.code;
        if !(2..=3).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::invalid(
                "code",
                "expected ISO 3166 alpha-2 or alpha-3 code",
            ));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Country {
    type Id = CountryId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "country"
    }

    fn element_name() -> &'static str {
        "Страна"
    }

    fn list_name() -> &'static str {
        "Страны"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CountryDto {
    pub id: Option<String>,
    pub code: String,
    pub description: String,
    pub nationality: Option<String>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_is_normalized_and_validated() {
        let c = Country::new_for_insert(" br ".into(), "Brasil".into(), Some("Brazilian".into()), None);
        assert_eq!(c.base.code, "BR");
        assert!(c.validate().is_ok());

        let bad = Country::new_for_insert("B1".into(), "Bad".into(), None, None);
        assert!(bad.validate().is_err());
        let too_long = Country::new_for_insert("BRAZ".into(), "Bad".into(), None, None);
        assert!(too_long.validate().is_err());
    }
}
