pub mod balance;
pub mod identity;
pub mod profile;
pub mod withdrawal_request;
