//! Shared contracts of the case-management backend: aggregates, DTOs,
//! enums and the static workflow tables.

pub mod domain;
pub mod enums;
pub mod shared;
