#![allow(dead_code)]

use backend::domain::{
    a003_company, a004_person, a009_case_status, a010_main_process, a011_individual_process,
};
use backend::shared::data::db;
use backend::system::initialization;
use contracts::domain::a003_company::aggregate::CompanyDto;
use contracts::domain::a004_person::aggregate::PersonDto;
use contracts::domain::a010_main_process::aggregate::MainProcessDto;
use contracts::domain::a011_individual_process::aggregate::IndividualProcessDto;
use contracts::domain::a012_individual_process_status::aggregate::AddStatusRecordDto;
use uuid::Uuid;

/// Свежая база во временном каталоге с каталогом статусов по умолчанию
pub async fn setup() {
    let path = std::env::temp_dir().join(format!("case-workflow-test-{}.db", Uuid::new_v4()));
    db::initialize_database(Some(path.to_str().unwrap()))
        .await
        .unwrap();
    initialization::seed_case_statuses().await.unwrap();
}

pub async fn status_id(code: &str) -> String {
    a009_case_status::service::get_by_code(code)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("status {} not seeded", code))
        .to_string_id()
}

pub async fn status_dto(code: &str) -> AddStatusRecordDto {
    AddStatusRecordDto {
        case_status_id: status_id(code).await,
        ..Default::default()
    }
}

/// Компания, заявитель, основной и индивидуальный процессы
pub async fn create_individual_process() -> Uuid {
    let company_id = a003_company::service::create(CompanyDto {
        description: "Acme Engenharia Ltda".into(),
        tax_id: Some("12.345.678/0001-90".into()),
        ..Default::default()
    })
    .await
    .unwrap();

    let person_id = a004_person::service::create(PersonDto {
        description: "John Smith".into(),
        birth_date: Some("1985-03-14".into()),
        ..Default::default()
    })
    .await
    .unwrap();

    let main_process_id = a010_main_process::service::create(MainProcessDto {
        description: "Work visas 2025".into(),
        company_id: company_id.to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    a011_individual_process::service::create(IndividualProcessDto {
        main_process_id: main_process_id.to_string(),
        person_id: person_id.to_string(),
        ..Default::default()
    })
    .await
    .unwrap()
}
