pub mod balance_repo;
pub mod identity_repo;
pub mod profile_repo;
pub mod withdrawal_request_repo;
