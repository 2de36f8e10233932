// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod config_repository;
pub mod http_response;
