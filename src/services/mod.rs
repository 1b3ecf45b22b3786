pub mod admin_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod session_service;
pub mod withdrawal_service;
