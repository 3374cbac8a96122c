pub mod lifecycle;
pub mod script;
