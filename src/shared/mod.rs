pub mod config;
pub mod errors;
pub mod utils;

// Re-exports for convenience
pub use config::{AppConfig, Tuning};
pub use errors::{AppError, AppResult};
