use contracts::domain::a009_case_status::aggregate::CaseStatus;
use contracts::domain::a011_individual_process::aggregate::IndividualProcess;
use contracts::domain::a012_individual_process_status::aggregate::{
    current_status_record, AddStatusRecordDto, IndividualProcessStatus,
};
use contracts::domain::a015_activity_log::aggregate::actions;
use contracts::domain::common::AggregateRoot;
use contracts::shared::validation::ValidationError;
use contracts::shared::workflow::{
    cascade_date_field, is_valid_individual_status_transition, is_valid_initial_status,
    ProcessKind,
};
use sea_orm::{ConnectionTrait, TransactionTrait};
use uuid::Uuid;

use super::repository;
use crate::domain::a009_case_status::repository as case_status_repository;
use crate::domain::a011_individual_process::service as process_service;
use crate::domain::a014_notification::service as notification_service;
use crate::domain::a015_activity_log::service as activity_log;
use crate::shared::data::db::get_connection;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

/// Статус каталога, соответствующий текущей записи истории процесса
pub async fn current_case_status_with<C: ConnectionTrait>(
    db: &C,
    individual_process_id: Uuid,
) -> ServiceResult<Option<CaseStatus>> {
    let records = repository::list_by_process_with(db, &individual_process_id.to_string()).await?;
    let Some(current) = current_status_record(&records) else {
        return Ok(None);
    };
    let case_status_id = parse_uuid(&current.case_status_id)?;
    Ok(case_status_repository::get_by_id_with(db, case_status_id).await?)
}

/// История статусов процесса в хронологическом порядке
pub async fn list_status_history(
    individual_process_id: Uuid,
) -> ServiceResult<Vec<IndividualProcessStatus>> {
    let db = get_connection();
    process_service::load_with(db, individual_process_id).await?;
    Ok(repository::list_by_process_with(db, &individual_process_id.to_string()).await?)
}

/// Добавление записи в историю статусов.
///
/// Всё выполняется в одной транзакции: проверка перехода, снятие
/// активности с предыдущей записи, вставка новой активной записи, перенос
/// даты в поле процесса, обновление кэша `case_status_id` с проверкой
/// версии, журнал и уведомление.
pub async fn add_status_record(
    individual_process_id: Uuid,
    dto: AddStatusRecordDto,
) -> ServiceResult<IndividualProcessStatus> {
    dto.validate()?;
    let case_status_id = parse_uuid(&dto.case_status_id)?;

    let txn = get_connection().begin().await?;

    let mut process = process_service::load_with(&txn, individual_process_id).await?;
    if let Some(expected) = dto.expected_version {
        if expected != process.base.metadata.version {
            return Err(ServiceError::Conflict(format!(
                "individual process {} has version {}, expected {}",
                individual_process_id, process.base.metadata.version, expected
            )));
        }
    }

    let status = case_status_repository::get_by_id_with(&txn, case_status_id)
        .await?
        .filter(|s| !s.base.metadata.is_deleted)
        .ok_or_else(|| ServiceError::not_found(CaseStatus::collection_name(), case_status_id))?;
    if !status.is_active {
        return Err(ValidationError::invalid("caseStatusId", "case status is inactive").into());
    }
    let new_code = status.base.code.clone();

    let history =
        repository::list_by_process_with(&txn, &individual_process_id.to_string()).await?;
    let previous_code = match current_status_record(&history) {
        Some(current) => {
            if !is_valid_individual_status_transition(&current.status_code, &new_code) {
                return Err(ServiceError::InvalidTransition {
                    from: current.status_code.clone(),
                    to: new_code,
                });
            }
            Some(current.status_code.clone())
        }
        None => {
            if !is_valid_initial_status(&new_code, ProcessKind::Individual) {
                return Err(ServiceError::InvalidTransition {
                    from: "(none)".to_string(),
                    to: new_code,
                });
            }
            None
        }
    };

    repository::deactivate_all_with(&txn, &individual_process_id.to_string()).await?;
    let record = IndividualProcessStatus::new_active(
        individual_process_id.to_string(),
        case_status_id.to_string(),
        new_code.clone(),
        dto.date.clone(),
        dto.notes.clone(),
    );
    repository::insert_with(&txn, &record).await?;

    if let (Some(field), Some(date)) = (cascade_date_field(&new_code), dto.date.as_deref()) {
        process.set_date_field(field, date);
    }
    process.case_status_id = Some(case_status_id.to_string());
    process_service::save_versioned_with(&txn, &mut process).await?;

    let transition = format!(
        "{} -> {}",
        previous_code.as_deref().unwrap_or("(none)"),
        new_code
    );
    activity_log::record_with(
        &txn,
        IndividualProcess::collection_name(),
        &individual_process_id.to_string(),
        actions::STATUS_CHANGE,
        Some(transition.clone()),
    )
    .await?;
    notification_service::notify_with(
        &txn,
        format!("{}: {}", process.base.code, status.base.description),
        format!("Status changed: {}", transition),
        IndividualProcess::collection_name(),
        &individual_process_id.to_string(),
    )
    .await?;

    txn.commit().await?;
    tracing::info!(
        "Individual process {} status: {}",
        individual_process_id,
        transition
    );
    Ok(record)
}

/// Удаление записи истории.
///
/// Если удалялась активная запись, активной становится последняя из
/// оставшихся, кэш статуса процесса обновляется.
pub async fn remove_status_record(record_id: Uuid) -> ServiceResult<()> {
    let txn = get_connection().begin().await?;

    let record = repository::get_by_id_with(&txn, record_id)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found(IndividualProcessStatus::collection_name(), record_id)
        })?;
    repository::delete_with(&txn, record_id).await?;

    if record.is_active {
        let process_id = parse_uuid(&record.individual_process_id)?;
        let remaining =
            repository::list_by_process_with(&txn, &record.individual_process_id).await?;
        let latest = remaining.iter().max_by_key(|r| r.created_at);
        if let Some(latest) = latest {
            repository::set_active_with(&txn, latest.id.value()).await?;
        }

        let mut process = process_service::load_with(&txn, process_id).await?;
        process.case_status_id = latest.map(|r| r.case_status_id.clone());
        process_service::save_versioned_with(&txn, &mut process).await?;
    }

    activity_log::record_with(
        &txn,
        IndividualProcess::collection_name(),
        &record.individual_process_id,
        actions::STATUS_REMOVED,
        Some(record.status_code.clone()),
    )
    .await?;
    txn.commit().await?;

    tracing::info!(
        "Status record {} ({}) removed from individual process {}",
        record_id,
        record.status_code,
        record.individual_process_id
    );
    Ok(())
}
