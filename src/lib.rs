pub mod cli;
pub mod modules;
pub mod render;
pub mod shared;
