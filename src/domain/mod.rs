// Domain layer - Pure UV models and rules
pub mod caption;
pub mod dashboard;
pub mod interaction;
pub mod series;
pub mod time;
pub mod uv;
pub mod window;
