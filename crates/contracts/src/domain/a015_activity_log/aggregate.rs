use serde::{Deserialize, Serialize};

/// Запись журнала действий
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub timestamp: String,
    /// Инициатор действия (пользователь или "system")
    pub actor: String,
    /// collection_name агрегата (например, "individual_process")
    pub entity_type: String,
    pub entity_id: String,
    /// create / update / delete / status_change / ...
    pub action: String,
    pub details: Option<String>,
}

/// Фильтр выборки журнала
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActivityLogQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub limit: Option<u64>,
}

/// Действия, которые пишутся в журнал
pub mod actions {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const STATUS_CHANGE: &str = "status_change";
    pub const STATUS_REMOVED: &str = "status_removed";
    pub const FIELDS_UPDATE: &str = "fields_update";
}
