use contracts::domain::a009_case_status::aggregate::CaseStatusDto;
use contracts::enums::case_status_category::CaseStatusCategory;

use crate::domain::a009_case_status::{repository, service};
use crate::shared::config::Config;

/// Статус каталога по умолчанию: (код, название, категория, цвет, заполняемые поля)
type DefaultStatus = (
    &'static str,
    &'static str,
    CaseStatusCategory,
    &'static str,
    &'static [&'static str],
);

/// Каталог по умолчанию покрывает все коды таблицы переходов
/// индивидуального процесса
const DEFAULT_CASE_STATUSES: &[DefaultStatus] = &[
    (
        "pending_documents",
        "Pending documents",
        CaseStatusCategory::Preparation,
        "#9E9E9E",
        &["passport_id", "process_type_id", "legal_framework_id", "cbo_code", "salary", "notes"],
    ),
    ("documents_submitted", "Documents submitted", CaseStatusCategory::Preparation, "#2196F3", &["notes"]),
    ("documents_under_review", "Documents under review", CaseStatusCategory::Review, "#FF9800", &["notes"]),
    ("documents_approved", "Documents approved", CaseStatusCategory::Approved, "#4CAF50", &["notes"]),
    (
        "preparing_submission",
        "Preparing submission",
        CaseStatusCategory::InProgress,
        "#3F51B5",
        &["process_type_id", "legal_framework_id", "cbo_code", "salary", "notes"],
    ),
    (
        "submitted_to_government",
        "Submitted to government",
        CaseStatusCategory::InProgress,
        "#673AB7",
        &["protocol_number", "notes"],
    ),
    (
        "under_government_review",
        "Under government review",
        CaseStatusCategory::Review,
        "#FFC107",
        &["protocol_number", "notes"],
    ),
    (
        "additional_info_requested",
        "Additional information requested",
        CaseStatusCategory::Review,
        "#F44336",
        &["deadline_date", "notes"],
    ),
    ("approved", "Approved", CaseStatusCategory::Approved, "#8BC34A", &["notes"]),
    ("rnm_scheduled", "RNM scheduled", CaseStatusCategory::InProgress, "#00BCD4", &["appointment_date", "notes"]),
    (
        "rnm_completed",
        "RNM completed",
        CaseStatusCategory::InProgress,
        "#009688",
        &["rnm_number", "rnm_deadline", "notes"],
    ),
    ("rejected", "Rejected", CaseStatusCategory::Review, "#E91E63", &["notes"]),
    ("completed", "Completed", CaseStatusCategory::Completed, "#2E7D32", &[]),
    ("cancelled", "Cancelled", CaseStatusCategory::Cancelled, "#757575", &[]),
];

/// Заполнить каталог статусов дел, если он пуст
pub async fn seed_case_statuses() -> anyhow::Result<usize> {
    if repository::count_all().await? > 0 {
        tracing::info!("Case status catalog already populated, skipping seed");
        return Ok(0);
    }

    for (index, (code, name, category, color, fields)) in DEFAULT_CASE_STATUSES.iter().enumerate() {
        let dto = CaseStatusDto {
            id: None,
            code: code.to_string(),
            description: name.to_string(),
            category: *category,
            color: color.to_string(),
            sort_order: (index as i32 + 1) * 10,
            fillable_fields: fields.iter().map(|f| f.to_string()).collect(),
            is_active: Some(true),
            comment: None,
        };
        service::create(dto)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed case status '{}': {}", code, e))?;
    }

    tracing::info!("Seeded {} default case statuses", DEFAULT_CASE_STATUSES.len());
    Ok(DEFAULT_CASE_STATUSES.len())
}

/// Начальное заполнение справочников согласно конфигурации
pub async fn run(config: &Config) -> anyhow::Result<()> {
    if config.seed.case_statuses {
        seed_case_statuses().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::workflow::{validate_fillable_fields, INDIVIDUAL_STATUS_TRANSITIONS};

    #[test]
    fn test_default_catalog_covers_every_transition_code() {
        for (from, targets) in INDIVIDUAL_STATUS_TRANSITIONS {
            for code in std::iter::once(from).chain(targets.iter()) {
                assert!(
                    DEFAULT_CASE_STATUSES.iter().any(|s| s.0 == *code),
                    "missing default status {}",
                    code
                );
            }
        }
    }

    #[test]
    fn test_default_fillable_fields_are_registered() {
        for (code, _, _, _, fields) in DEFAULT_CASE_STATUSES {
            let names: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
            assert!(validate_fillable_fields(&names).is_ok(), "{}", code);
        }
    }
}
