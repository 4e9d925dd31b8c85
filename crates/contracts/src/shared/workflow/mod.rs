//! Статусная модель процессов: таблицы переходов и заполняемые поля

pub mod fillable_fields;
pub mod status_transitions;

pub use fillable_fields::{
    cascade_date_field, enforce_fillable_fields, validate_fillable_fields, FillableField,
    IndividualProcessFieldsPatch, FILLABLE_FIELDS,
};
pub use status_transitions::{
    allowed_next_statuses, check_status_transition, is_valid_individual_status_transition, is_valid_initial_status,
    is_valid_main_status_transition, is_valid_status_transition, ProcessKind, StatusTransitionError,
    INDIVIDUAL_STATUS_TRANSITIONS, INITIAL_INDIVIDUAL_STATUS, INITIAL_MAIN_STATUS,
    MAIN_STATUS_TRANSITIONS,
};
