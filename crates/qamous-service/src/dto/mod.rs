//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities and service results to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{RecalculateRequest, SwitchReactionRequest};

pub use responses::{
    CountResponse, HealthChecks, HealthResponse, ReactionCountsResponse, ReactionItemResponse,
    ReactionResponse, ReactionStateResponse, ReadinessResponse, RecalculateResponse,
    RecalculatedCountsResponse, ResetResponse,
};
