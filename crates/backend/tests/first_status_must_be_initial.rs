mod common;

use backend::domain::{a011_individual_process, a012_individual_process_status};
use backend::shared::error::ServiceError;
use contracts::domain::a012_individual_process_status::aggregate::AddStatusRecordDto;
use uuid::Uuid;

use common::{create_individual_process, setup, status_dto};

#[tokio::test]
async fn first_record_must_be_pending_documents() {
    setup().await;
    let process_id = create_individual_process().await;

    let err = a012_individual_process_status::service::add_status_record(
        process_id,
        status_dto("documents_submitted").await,
    )
    .await
    .unwrap_err();
    assert!(
        matches!(err, ServiceError::InvalidTransition { ref to, .. } if to == "documents_submitted"),
        "{err:?}"
    );

    // Неизвестный статус и неизвестный процесс
    let err = a012_individual_process_status::service::add_status_record(
        process_id,
        AddStatusRecordDto {
            case_status_id: Uuid::new_v4().to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }), "{err:?}");

    let err = a012_individual_process_status::service::add_status_record(
        Uuid::new_v4(),
        status_dto("pending_documents").await,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }), "{err:?}");

    // Неудачные попытки ничего не записали
    let history = a012_individual_process_status::service::list_status_history(process_id)
        .await
        .unwrap();
    assert!(history.is_empty());
    let process = a011_individual_process::service::get_by_id(process_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(process.case_status_id, None);
    assert_eq!(process.base.metadata.version, 0);

    let record = a012_individual_process_status::service::add_status_record(
        process_id,
        status_dto("pending_documents").await,
    )
    .await
    .unwrap();
    assert!(record.is_active);
    assert_eq!(record.status_code, "pending_documents");
}
