//! # Haven Core
//!
//! Core business logic for the Haven shelter-bed and referral tracker.
//!
//! This crate contains the domain types, the SQLite persistence store, and the
//! service layer that the API boundary and CLI drive:
//! - Referral intake and status tracking
//! - Bed inventory with per-facility derived summaries
//! - Append-only activity log and dashboard statistics
//!
//! **No API concerns**: HTTP servers, request/response payloads, and status
//! code mapping belong in `api-rest` and `api-shared`.

pub mod activity;
pub mod bed;
pub mod config;
pub mod error;
pub mod facility;
pub mod id;
pub mod referral;
pub mod service;
pub mod stats;
pub mod store;

pub use activity::ActivityEntry;
pub use bed::{Bed, BedStatus, NewBed};
pub use config::{db_path_from_env_value, CoreConfig, DEFAULT_DB_PATH};
pub use error::{CoreError, CoreResult};
pub use facility::{summarize_facilities, FacilitySummary};
pub use referral::{NewReferral, Referral, ReferralStatus};
pub use service::ShelterService;
pub use stats::DashboardStats;
pub use store::Store;
