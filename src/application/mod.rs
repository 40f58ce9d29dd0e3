// Application layer - Services and repository contract
pub mod availability_service;
pub mod dashboard_service;
pub mod uv_repository;
