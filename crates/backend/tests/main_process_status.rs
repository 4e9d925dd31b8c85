mod common;

use backend::domain::{a003_company, a010_main_process};
use backend::shared::data::db::get_connection;
use backend::shared::error::ServiceError;
use contracts::domain::a003_company::aggregate::CompanyDto;
use contracts::domain::a010_main_process::aggregate::MainProcessDto;

use common::setup;

#[tokio::test]
async fn main_process_status_follows_its_table() {
    setup().await;

    let company_id = a003_company::service::create(CompanyDto {
        description: "Petro Offshore S.A.".into(),
        ..Default::default()
    })
    .await
    .unwrap();
    let id = a010_main_process::service::create(MainProcessDto {
        description: "Crew rotation Q3".into(),
        company_id: company_id.to_string(),
        requested_at: Some("2025-07-01".into()),
        ..Default::default()
    })
    .await
    .unwrap();

    let process = a010_main_process::service::get_by_id(id).await.unwrap().unwrap();
    assert_eq!(process.status, "draft");

    let err = a010_main_process::service::change_main_status(id, "completed", None)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ServiceError::InvalidTransition { ref from, ref to }
            if from == "draft" && to == "completed"),
        "{err:?}"
    );

    for status in ["in_progress", "on_hold", "in_progress", "completed"] {
        let process = a010_main_process::service::change_main_status(id, status, None)
            .await
            .unwrap();
        assert_eq!(process.status, status);
    }

    // Из завершённого дальше не двигаемся
    let err = a010_main_process::service::change_main_status(id, "cancelled", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }), "{err:?}");

    // Повтор текущего статуса не ошибка
    let process = a010_main_process::service::change_main_status(id, "completed", None)
        .await
        .unwrap();
    assert_eq!(process.status, "completed");

    concurrent_changes_do_not_both_commit().await;
}

/// Две смены статуса по одной прочитанной версии: фиксируется только первая
async fn concurrent_changes_do_not_both_commit() {
    let company_id = a003_company::service::create(CompanyDto {
        description: "Petro Offshore S.A.".into(),
        ..Default::default()
    })
    .await
    .unwrap();
    let id = a010_main_process::service::create(MainProcessDto {
        description: "Drilling crew 2025".into(),
        company_id: company_id.to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    // Оба клиента прочитали черновик с одной и той же версией
    let seen = a010_main_process::service::get_by_id(id).await.unwrap().unwrap();
    let seen_version = seen.base.metadata.version;

    let first =
        a010_main_process::service::change_main_status(id, "in_progress", Some(seen_version))
            .await
            .unwrap();
    assert_eq!(first.status, "in_progress");
    assert_eq!(first.base.metadata.version, seen_version + 1);

    let err =
        a010_main_process::service::change_main_status(id, "cancelled", Some(seen_version))
            .await
            .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)), "{err:?}");

    // Запись по устаревшей версии не проходит и на уровне репозитория
    let mut stale = seen.clone();
    stale.change_status("cancelled").unwrap();
    stale.base.metadata.increment_version();
    let written = a010_main_process::repository::update_versioned_with(
        get_connection(),
        &stale,
        seen_version,
    )
    .await
    .unwrap();
    assert!(!written);

    let stored = a010_main_process::service::get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.status, "in_progress");
    assert_eq!(stored.base.metadata.version, seen_version + 1);
}
