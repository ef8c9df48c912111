//! Wire models exchanged with the upstream data service and API callers.

pub mod job;
pub mod log_operation;
pub mod member;
pub mod pagination;
pub mod role;
pub mod search;
