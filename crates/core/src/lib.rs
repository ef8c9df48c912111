//! Shared building blocks for the phone live status service.
//!
//! Everything here is transport-agnostic: id and time aliases, the domain
//! error enum, permission names, pagination clamps and the CSV writer.

pub mod csv;
pub mod error;
pub mod pagination;
pub mod permissions;
pub mod types;
