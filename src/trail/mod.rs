pub mod engine;
pub mod particles;
pub mod points;
