//! Business services composing repositories.
//!
//! Services own their repositories by value; constructing one requires the
//! repositories to exist first.

pub mod member;
pub mod phone_live_status;

pub use member::MemberService;
pub use phone_live_status::PhoneLiveStatusService;
