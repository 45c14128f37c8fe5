//! Business logic services
//!
//! Reaction validation, counter maintenance, points, and the transaction
//! coordinator that ties them together, plus administrative maintenance.

pub mod context;
pub mod counter;
pub mod error;
pub mod maintenance;
pub mod points;
pub mod reaction;
pub mod validator;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use counter::CounterMaintainer;
pub use error::{ServiceError, ServiceResult};
pub use maintenance::{MaintenanceService, RecalculationReport};
pub use points::PointsLedger;
pub use reaction::{ReactionOutcome, ReactionService};
pub use validator::{ReactionValidator, ValidatedReaction};
