use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // REFERENCE DATA
        // ========================================
        .route(
            "/api/country",
            get(handlers::a001_country::list_all).post(handlers::a001_country::upsert),
        )
        .route(
            "/api/country/:id",
            get(handlers::a001_country::get_by_id).delete(handlers::a001_country::delete),
        )
        .route(
            "/api/city",
            get(handlers::a002_city::list_all).post(handlers::a002_city::upsert),
        )
        .route(
            "/api/city/:id",
            get(handlers::a002_city::get_by_id).delete(handlers::a002_city::delete),
        )
        .route(
            "/api/company",
            get(handlers::a003_company::list_all).post(handlers::a003_company::upsert),
        )
        .route(
            "/api/company/:id",
            get(handlers::a003_company::get_by_id).delete(handlers::a003_company::delete),
        )
        .route(
            "/api/person",
            get(handlers::a004_person::list_all).post(handlers::a004_person::upsert),
        )
        .route(
            "/api/person/:id",
            get(handlers::a004_person::get_by_id).delete(handlers::a004_person::delete),
        )
        .route(
            "/api/passport",
            get(handlers::a005_passport::list_all).post(handlers::a005_passport::upsert),
        )
        .route(
            "/api/passport/:id",
            get(handlers::a005_passport::get_by_id).delete(handlers::a005_passport::delete),
        )
        .route(
            "/api/document_type",
            get(handlers::a006_document_type::list_all).post(handlers::a006_document_type::upsert),
        )
        .route(
            "/api/document_type/:id",
            get(handlers::a006_document_type::get_by_id)
                .delete(handlers::a006_document_type::delete),
        )
        .route(
            "/api/legal_framework",
            get(handlers::a007_legal_framework::list_all)
                .post(handlers::a007_legal_framework::upsert),
        )
        .route(
            "/api/legal_framework/:id",
            get(handlers::a007_legal_framework::get_by_id)
                .delete(handlers::a007_legal_framework::delete),
        )
        .route(
            "/api/process_type",
            get(handlers::a008_process_type::list_all).post(handlers::a008_process_type::upsert),
        )
        .route(
            "/api/process_type/:id",
            get(handlers::a008_process_type::get_by_id)
                .delete(handlers::a008_process_type::delete),
        )
        // Case status catalog
        .route(
            "/api/case_status",
            get(handlers::a009_case_status::list_all).post(handlers::a009_case_status::upsert),
        )
        .route(
            "/api/case_status/:id",
            get(handlers::a009_case_status::get_by_id).delete(handlers::a009_case_status::delete),
        )
        // ========================================
        // PROCESSES
        // ========================================
        .route(
            "/api/main_process",
            get(handlers::a010_main_process::list_all).post(handlers::a010_main_process::upsert),
        )
        .route(
            "/api/main_process/:id",
            get(handlers::a010_main_process::get_by_id)
                .delete(handlers::a010_main_process::delete),
        )
        .route(
            "/api/main_process/:id/status",
            post(handlers::a010_main_process::change_status),
        )
        .route(
            "/api/individual_process",
            get(handlers::a011_individual_process::list_all)
                .post(handlers::a011_individual_process::upsert),
        )
        .route(
            "/api/individual_process/:id",
            get(handlers::a011_individual_process::get_by_id)
                .delete(handlers::a011_individual_process::delete),
        )
        .route(
            "/api/individual_process/:id/fields",
            patch(handlers::a011_individual_process::update_fields),
        )
        // Status history
        .route(
            "/api/individual_process/:id/status_history",
            get(handlers::a012_individual_process_status::list_status_history)
                .post(handlers::a012_individual_process_status::add_status_record),
        )
        .route(
            "/api/individual_process_status/:id",
            delete(handlers::a012_individual_process_status::remove_status_record),
        )
        // ========================================
        // TASKS, NOTIFICATIONS, ACTIVITY
        // ========================================
        .route(
            "/api/task",
            get(handlers::a013_task::list_all).post(handlers::a013_task::upsert),
        )
        .route(
            "/api/task/:id",
            get(handlers::a013_task::get_by_id).delete(handlers::a013_task::delete),
        )
        .route("/api/task/:id/complete", post(handlers::a013_task::complete))
        .route(
            "/api/notification",
            get(handlers::a014_notification::list_all).post(handlers::a014_notification::upsert),
        )
        .route(
            "/api/notification/:id",
            get(handlers::a014_notification::get_by_id)
                .delete(handlers::a014_notification::delete),
        )
        .route(
            "/api/notification/:id/read",
            post(handlers::a014_notification::mark_read),
        )
        .route("/api/activity_log", get(handlers::a015_activity_log::list))
        // ========================================
        // WORKFLOW & FIELD REGISTRY
        // ========================================
        .route(
            "/api/workflow/:kind/:status/next",
            get(handlers::registry::next_statuses),
        )
        .route(
            "/api/registry/fields/:entity",
            get(handlers::registry::entity_fields),
        )
        .route(
            "/api/registry/fillable_fields",
            get(handlers::registry::fillable_fields),
        )
}
