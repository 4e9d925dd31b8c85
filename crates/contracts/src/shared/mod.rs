pub mod field_registry;
pub mod validation;
pub mod workflow;
