pub mod case_status_category;
pub mod task_enums;
