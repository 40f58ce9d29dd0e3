// Presentation layer - HTTP surface over the dashboard state
pub mod app_state;
pub mod handlers;
pub mod routes;
pub mod view;
