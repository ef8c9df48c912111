//! Phone live status API server library.
//!
//! Exposes config, error handling, middleware, services, the controller and
//! the route registrar so integration tests and the binary entrypoint share
//! the same building blocks.

pub mod auth;
pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
