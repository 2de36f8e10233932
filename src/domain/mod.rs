// Domain layer - Pure types shared by the pipeline
pub mod data_view;
pub mod palette;
pub mod settings;
pub mod view_model;
pub mod visual;
