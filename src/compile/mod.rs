pub mod plan;
pub mod strategy;
