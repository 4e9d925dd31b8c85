use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::validation::ValidationError;
use contracts::shared::workflow::StatusTransitionError;
use serde_json::json;
use thiserror::Error;

/// Ошибки сервисного слоя
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid ID: {0}")]
    InvalidId(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Status transition '{from}' -> '{to}' is not allowed")]
    InvalidTransition { from: String, to: String },

    #[error("Field '{field}' cannot be edited while the process is in status '{status}'")]
    FieldNotFillable { field: String, status: String },

    #[error("Code '{0}' is already in use")]
    DuplicateCode(String),

    #[error("{0} is still referenced")]
    InUse(String),

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::InvalidTransition { .. } | ServiceError::FieldNotFillable { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServiceError::DuplicateCode(_) | ServiceError::InUse(_) | ServiceError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            ServiceError::Db(_) | ServiceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StatusTransitionError> for ServiceError {
    fn from(e: StatusTransitionError) -> Self {
        ServiceError::InvalidTransition {
            from: e.from,
            to: e.to,
        }
    }
}

/// Разбор UUID из параметра пути
pub fn parse_uuid(id: &str) -> ServiceResult<uuid::Uuid> {
    uuid::Uuid::parse_str(id).map_err(|_| ServiceError::InvalidId(id.to_string()))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::from(ValidationError::Required("code")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::not_found("Case status", "x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::InvalidTransition {
                from: "pending_documents".into(),
                to: "completed".into()
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::Conflict("stale version".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::from(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_are_human_readable() {
        let e = ServiceError::InvalidTransition {
            from: "pending_documents".into(),
            to: "completed".into(),
        };
        assert_eq!(
            e.to_string(),
            "Status transition 'pending_documents' -> 'completed' is not allowed"
        );
        assert!(parse_uuid("nope").is_err());

        let from_contracts = ServiceError::from(StatusTransitionError {
            from: "draft".into(),
            to: "completed".into(),
        });
        assert_eq!(from_contracts.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
