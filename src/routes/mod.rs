pub mod admin_routes;
pub mod auth_routes;
pub mod dashboard_routes;
pub mod session_routes;
pub mod wallet_routes;
