// Application layer - The view model pipeline and its use cases
pub mod error;
pub mod state_classifier;
pub mod view_model_builder;
pub mod visual_repository;
pub mod visual_service;
