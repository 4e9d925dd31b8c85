pub mod a001_country;
pub mod a002_city;
pub mod a003_company;
pub mod a004_person;
pub mod a005_passport;
pub mod a006_document_type;
pub mod a007_legal_framework;
pub mod a008_process_type;
pub mod a009_case_status;
pub mod a010_main_process;
pub mod a011_individual_process;
pub mod a012_individual_process_status;
pub mod a013_task;
pub mod a014_notification;
pub mod a015_activity_log;
pub mod registry;
