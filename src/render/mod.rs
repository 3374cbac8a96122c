pub mod backend;
pub mod cpu;
