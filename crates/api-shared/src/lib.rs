//! # API Shared
//!
//! Shared definitions for the Haven REST surface.
//!
//! Contains:
//! - Request/response payload types (`messages` module)
//! - The `HealthService` liveness check
//!
//! Used by `api-rest` and the top-level server binary.

pub mod health;
pub mod messages;

pub use health::{HealthRes, HealthService};
pub use messages::*;
