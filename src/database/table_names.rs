pub const PROFILE_TABLE_NAME: &str = "profile";
pub const BALANCE_TABLE_NAME: &str = "balance";
pub const WITHDRAWAL_REQUEST_TABLE_NAME: &str = "withdrawal_request";
pub const IDENTITY_TABLE_NAME: &str = "auth_identity";
