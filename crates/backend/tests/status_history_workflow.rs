mod common;

use backend::domain::{
    a011_individual_process, a012_individual_process_status, a014_notification,
    a015_activity_log,
};
use backend::shared::error::ServiceError;
use contracts::domain::a015_activity_log::aggregate::{actions, ActivityLogQuery};

use common::{create_individual_process, setup, status_dto, status_id};

#[tokio::test]
async fn status_history_follows_transition_table() {
    setup().await;
    let process_id = create_individual_process().await;
    let history = a012_individual_process_status::service::list_status_history(process_id)
        .await
        .unwrap();
    assert!(history.is_empty());

    a012_individual_process_status::service::add_status_record(
        process_id,
        status_dto("pending_documents").await,
    )
    .await
    .unwrap();

    // Переход, которого нет в таблице
    let err = a012_individual_process_status::service::add_status_record(
        process_id,
        status_dto("completed").await,
    )
    .await
    .unwrap_err();
    assert!(
        matches!(err, ServiceError::InvalidTransition { ref from, ref to }
            if from == "pending_documents" && to == "completed"),
        "{err:?}"
    );

    for code in [
        "documents_submitted",
        "documents_under_review",
        "documents_approved",
        "preparing_submission",
        "submitted_to_government",
        "under_government_review",
        "approved",
    ] {
        a012_individual_process_status::service::add_status_record(
            process_id,
            status_dto(code).await,
        )
        .await
        .unwrap();
    }

    // Дата записи переносится в дату приёма
    let mut scheduled = status_dto("rnm_scheduled").await;
    scheduled.date = Some("2025-09-15".into());
    scheduled.notes = Some("Polícia Federal, 10:00".into());
    let record = a012_individual_process_status::service::add_status_record(process_id, scheduled)
        .await
        .unwrap();
    assert!(record.is_active);
    assert_eq!(record.status_code, "rnm_scheduled");

    let process = a011_individual_process::service::get_by_id(process_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(process.appointment_date.as_deref(), Some("2025-09-15"));
    assert_eq!(
        process.case_status_id.as_deref(),
        Some(status_id("rnm_scheduled").await.as_str())
    );
    assert_eq!(process.base.metadata.version, 9);

    let history = a012_individual_process_status::service::list_status_history(process_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 9);
    assert_eq!(history.iter().filter(|r| r.is_active).count(), 1);
    assert_eq!(history.last().unwrap().id, record.id);

    // Удаление активной записи возвращает предыдущий статус
    a012_individual_process_status::service::remove_status_record(record.id.value())
        .await
        .unwrap();
    let history = a012_individual_process_status::service::list_status_history(process_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 8);
    let active: Vec<_> = history.iter().filter(|r| r.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].status_code, "approved");

    let process = a011_individual_process::service::get_by_id(process_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        process.case_status_id.as_deref(),
        Some(status_id("approved").await.as_str())
    );

    let log = a015_activity_log::service::list(ActivityLogQuery {
        entity_type: Some("individual_process".into()),
        entity_id: Some(process_id.to_string()),
        limit: None,
    })
    .await
    .unwrap();
    assert_eq!(
        log.iter().filter(|e| e.action == actions::STATUS_CHANGE).count(),
        9
    );
    assert_eq!(
        log.iter().filter(|e| e.action == actions::STATUS_REMOVED).count(),
        1
    );

    let notifications = a014_notification::service::list(None, true).await.unwrap();
    assert_eq!(
        notifications
            .iter()
            .filter(|n| n.entity_id.as_deref() == Some(process_id.to_string().as_str()))
            .count(),
        9
    );
}
