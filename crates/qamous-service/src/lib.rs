//! # qamous-service
//!
//! Application layer: reaction validation, counter and points maintenance, the
//! transaction coordinator, administrative maintenance, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    MaintenanceService, ReactionOutcome, ReactionService, RecalculationReport, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
