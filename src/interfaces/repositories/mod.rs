pub mod balance_ifce;
pub mod profile_ifce;
pub mod withdrawal_request_ifce;
