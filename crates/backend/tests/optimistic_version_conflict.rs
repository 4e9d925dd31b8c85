mod common;

use backend::domain::{a011_individual_process, a012_individual_process_status};
use backend::shared::error::ServiceError;

use common::{create_individual_process, setup, status_dto};

#[tokio::test]
async fn stale_expected_version_is_rejected() {
    setup().await;
    let process_id = create_individual_process().await;

    let mut first = status_dto("pending_documents").await;
    first.expected_version = Some(0);
    a012_individual_process_status::service::add_status_record(process_id, first)
        .await
        .unwrap();

    // Клиент всё ещё видит версию 0
    let mut stale = status_dto("documents_submitted").await;
    stale.expected_version = Some(0);
    let err = a012_individual_process_status::service::add_status_record(process_id, stale)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)), "{err:?}");

    let history = a012_individual_process_status::service::list_status_history(process_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status_code, "pending_documents");
    assert!(history[0].is_active);

    let mut fresh = status_dto("documents_submitted").await;
    fresh.expected_version = Some(1);
    a012_individual_process_status::service::add_status_record(process_id, fresh)
        .await
        .unwrap();

    let process = a011_individual_process::service::get_by_id(process_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(process.base.metadata.version, 2);
}
