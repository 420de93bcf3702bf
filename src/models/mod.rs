//! Data models for the dashboard.

mod strike;
mod topic;
mod user;

pub use strike::*;
pub use topic::*;
pub use user::*;
