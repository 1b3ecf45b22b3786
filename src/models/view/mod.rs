pub mod dashboard;
pub mod session;
pub mod user;
pub mod withdrawal;
