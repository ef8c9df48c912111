//! Repository layer.
//!
//! Each repository owns an [`UpstreamClient`](crate::UpstreamClient) built
//! from the shared config and HTTP client, and exposes async methods that
//! map one-to-one onto upstream endpoints.

pub mod log_operation_repo;
pub mod member_repo;
pub mod phone_live_status_repo;
pub mod role_repo;

pub use log_operation_repo::LogOperationRepo;
pub use member_repo::MemberRepo;
pub use phone_live_status_repo::PhoneLiveStatusRepo;
pub use role_repo::RoleRepo;
