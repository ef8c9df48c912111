//! Request-handling controllers.
//!
//! A controller owns the services its routes need and is shared with its
//! handlers as router state.

pub mod phone_live_status;

pub use phone_live_status::PhoneLiveStatusController;
