mod common;

use backend::domain::{a009_case_status, a012_individual_process_status};
use backend::shared::error::ServiceError;
use contracts::domain::a009_case_status::aggregate::CaseStatusDto;
use contracts::enums::case_status_category::CaseStatusCategory;
use contracts::shared::workflow::INDIVIDUAL_STATUS_TRANSITIONS;

use common::{create_individual_process, setup, status_dto, status_id};

fn custom_status(code: &str) -> CaseStatusDto {
    CaseStatusDto {
        id: None,
        code: code.into(),
        description: "Waiting for sworn translation".into(),
        category: CaseStatusCategory::Preparation,
        color: "#795548".into(),
        sort_order: 5,
        fillable_fields: vec!["notes".into()],
        is_active: Some(true),
        comment: None,
    }
}

#[tokio::test]
async fn catalog_rules() {
    setup().await;

    let catalog = a009_case_status::service::list(false).await.unwrap();
    assert_eq!(catalog.len(), INDIVIDUAL_STATUS_TRANSITIONS.len());
    assert!(catalog.windows(2).all(|w| w[0].sort_order <= w[1].sort_order));

    // Коды уникальны
    let err = a009_case_status::service::create(custom_status("pending_documents"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateCode(_)), "{err:?}");

    // Неизвестное заполняемое поле
    let mut bad = custom_status("awaiting_translation");
    bad.fillable_fields = vec!["favourite_colour".into()];
    let err = a009_case_status::service::create(bad).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)), "{err:?}");

    let custom_id = a009_case_status::service::create(custom_status("awaiting_translation"))
        .await
        .unwrap();

    // Неактивные скрыты по умолчанию
    let mut inactive = custom_status("awaiting_translation");
    inactive.id = Some(custom_id.to_string());
    inactive.is_active = Some(false);
    a009_case_status::service::update(inactive).await.unwrap();
    assert!(!a009_case_status::service::list(false)
        .await
        .unwrap()
        .iter()
        .any(|s| s.base.code == "awaiting_translation"));
    assert!(a009_case_status::service::list(true)
        .await
        .unwrap()
        .iter()
        .any(|s| s.base.code == "awaiting_translation"));

    // Статус без ссылок удаляется, статус из истории нет
    assert!(a009_case_status::service::delete(custom_id).await.unwrap());

    let process_id = create_individual_process().await;
    a012_individual_process_status::service::add_status_record(
        process_id,
        status_dto("pending_documents").await,
    )
    .await
    .unwrap();

    let pending_id = uuid::Uuid::parse_str(&status_id("pending_documents").await).unwrap();
    let err = a009_case_status::service::delete(pending_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::InUse(_)), "{err:?}");
    assert!(a009_case_status::service::get_by_code("pending_documents")
        .await
        .unwrap()
        .is_some());

    // Код статуса из истории переименовать нельзя, остальные реквизиты можно
    let pending = a009_case_status::service::get_by_id(pending_id)
        .await
        .unwrap()
        .unwrap();
    let mut rename = CaseStatusDto {
        id: Some(pending_id.to_string()),
        code: "documentos_pendentes".into(),
        description: pending.base.description.clone(),
        category: pending.category,
        color: pending.color.clone(),
        sort_order: pending.sort_order,
        fillable_fields: pending.fillable_fields.clone(),
        is_active: Some(true),
        comment: None,
    };
    let err = a009_case_status::service::update(rename.clone()).await.unwrap_err();
    assert!(matches!(err, ServiceError::InUse(_)), "{err:?}");

    rename.code = "pending_documents".into();
    rename.color = "#FF7043".into();
    a009_case_status::service::update(rename).await.unwrap();
    let pending = a009_case_status::service::get_by_id(pending_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pending.base.code, "pending_documents");
    assert_eq!(pending.color, "#FF7043");

    // Новый процесс по-прежнему стартует с начального статуса
    let second_process_id = create_individual_process().await;
    let record = a012_individual_process_status::service::add_status_record(
        second_process_id,
        status_dto("pending_documents").await,
    )
    .await
    .unwrap();
    assert_eq!(record.status_code, "pending_documents");

    // Статус без истории переименовывается свободно
    let free_id = a009_case_status::service::create(custom_status("awaiting_apostille"))
        .await
        .unwrap();
    let mut renamed = custom_status("awaiting_legalization");
    renamed.id = Some(free_id.to_string());
    a009_case_status::service::update(renamed).await.unwrap();
    assert!(a009_case_status::service::get_by_code("awaiting_legalization")
        .await
        .unwrap()
        .is_some());
}
