//! Session token handling.
//!
//! Tokens are issued by the central auth service; this crate only verifies
//! them and reads the session payload.

pub mod jwt;
