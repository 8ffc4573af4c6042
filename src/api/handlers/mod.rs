//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod contract_handler;
pub mod dashboard_handler;
pub mod master_data_handler;
pub mod warning_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::{auth_protected_routes, auth_public_routes};
pub use contract_handler::contract_routes;
pub use dashboard_handler::dashboard_routes;
pub use master_data_handler::master_data_routes;
pub use warning_handler::warning_routes;
