mod common;

use backend::domain::{
    a004_person, a005_passport, a008_process_type, a011_individual_process,
    a012_individual_process_status,
};
use backend::shared::error::ServiceError;
use contracts::domain::a004_person::aggregate::PersonDto;
use contracts::domain::a005_passport::aggregate::PassportDto;
use contracts::domain::a008_process_type::aggregate::ProcessTypeDto;
use contracts::shared::workflow::IndividualProcessFieldsPatch;

use common::{create_individual_process, setup, status_dto};

#[tokio::test]
async fn only_whitelisted_fields_can_be_patched() {
    setup().await;
    let process_id = create_individual_process().await;

    // Без истории заполнять нельзя ничего
    let err = a011_individual_process::service::update_fields(
        process_id,
        IndividualProcessFieldsPatch {
            notes: Some("first contact".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(
        matches!(err, ServiceError::FieldNotFillable { ref field, ref status }
            if field == "notes" && status == "none"),
        "{err:?}"
    );

    a012_individual_process_status::service::add_status_record(
        process_id,
        status_dto("pending_documents").await,
    )
    .await
    .unwrap();

    let updated = a011_individual_process::service::update_fields(
        process_id,
        IndividualProcessFieldsPatch {
            cbo_code: Some("2142-05".into()),
            salary: Some(18500.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.cbo_code.as_deref(), Some("2142-05"));
    assert_eq!(updated.salary, Some(18500.0));

    // protocol_number открывается только после подачи
    let err = a011_individual_process::service::update_fields(
        process_id,
        IndividualProcessFieldsPatch {
            protocol_number: Some("08000.012345/2025-11".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(
        matches!(err, ServiceError::FieldNotFillable { ref field, ref status }
            if field == "protocol_number" && status == "pending_documents"),
        "{err:?}"
    );

    // Значение проверяется после прохождения белого списка
    let err = a011_individual_process::service::update_fields(
        process_id,
        IndividualProcessFieldsPatch {
            salary: Some(-1.0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)), "{err:?}");

    let stored = a011_individual_process::service::get_by_id(process_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.salary, Some(18500.0));
    assert_eq!(stored.protocol_number, None);

    patched_references_must_exist(process_id, &stored.person_id).await;
}

fn passport(number: &str, person_id: &str) -> PassportDto {
    PassportDto {
        number: number.into(),
        person_id: person_id.into(),
        issue_date: "2021-05-10".into(),
        expiry_date: "2031-05-09".into(),
        ..Default::default()
    }
}

/// Ссылочные поля патча: запись должна существовать, паспорт принадлежать заявителю
async fn patched_references_must_exist(process_id: uuid::Uuid, person_id: &str) {
    let missing = uuid::Uuid::new_v4().to_string();
    for patch in [
        IndividualProcessFieldsPatch {
            passport_id: Some(missing.clone()),
            ..Default::default()
        },
        IndividualProcessFieldsPatch {
            process_type_id: Some(missing.clone()),
            ..Default::default()
        },
        IndividualProcessFieldsPatch {
            legal_framework_id: Some(missing.clone()),
            ..Default::default()
        },
    ] {
        let err = a011_individual_process::service::update_fields(process_id, patch)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }), "{err:?}");
    }

    let other_person_id = a004_person::service::create(PersonDto {
        description: "Maria Garcia".into(),
        ..Default::default()
    })
    .await
    .unwrap();
    let foreign_passport_id =
        a005_passport::service::create(passport("PA1234567", &other_person_id.to_string()))
            .await
            .unwrap();
    let err = a011_individual_process::service::update_fields(
        process_id,
        IndividualProcessFieldsPatch {
            passport_id: Some(foreign_passport_id.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)), "{err:?}");

    // Удалённый тип процесса тоже не подходит
    let process_type_id = a008_process_type::service::create(ProcessTypeDto {
        description: "Temporary residence for work".into(),
        ..Default::default()
    })
    .await
    .unwrap();
    assert!(a008_process_type::service::delete(process_type_id).await.unwrap());
    let err = a011_individual_process::service::update_fields(
        process_id,
        IndividualProcessFieldsPatch {
            process_type_id: Some(process_type_id.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }), "{err:?}");

    let own_passport_id = a005_passport::service::create(passport("GB9876543", person_id))
        .await
        .unwrap();
    let updated = a011_individual_process::service::update_fields(
        process_id,
        IndividualProcessFieldsPatch {
            passport_id: Some(own_passport_id.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.passport_id, Some(own_passport_id.to_string()));
}
