use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::validation::{require, validate_ref, ValidationError};

crate::aggregate_id!(
    /// Уникальный идентификатор города
    CityId
);

/// Город
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub base: BaseAggregate<CityId>,

    /// Ссылка на страну (a001_country)
    pub country_id: String,

    /// Штат / регион (например, "SP")
    pub state: Option<String>,
}

impl City {
    pub fn new_for_insert(
        code: String,
        description: String,
        country_id: String,
        state: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(CityId::new_v4(), code, description);
        base.comment = comment;
        Self {
            base,
            country_id,
            state,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &CityDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.country_id = dto.country_id.clone();
        self.state = dto.state.clone();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("description", &self.base.description)?;
        require("code", &self.base.code)?;
        validate_ref("country_id", &self.country_id)?;
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for City {
    type Id = CityId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "city"
    }

    fn element_name() -> &'static str {
        "Город"
    }

    fn list_name() -> &'static str {
        "Города"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CityDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub country_id: String,
    pub state: Option<String>,
    pub comment: Option<String>,
}
