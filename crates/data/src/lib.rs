//! Data access for the phone live status feature.
//!
//! Nothing here talks to a database directly: every repository is a thin
//! client of the upstream data service, sharing one pooled
//! [`reqwest::Client`] handed in at construction.

pub mod client;
pub mod config;
pub mod models;
pub mod repositories;

pub use client::{UpstreamClient, UpstreamError};
pub use config::UpstreamConfig;
