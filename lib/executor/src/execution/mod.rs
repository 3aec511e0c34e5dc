pub mod analysis;
pub mod analyzer;
pub mod error;
pub mod fetch;
pub mod plan;
pub mod step_info;
pub mod strategy;
pub mod stream;
