pub mod dataset;
pub mod visual_config;
