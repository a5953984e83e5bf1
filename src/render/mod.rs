pub mod csv;
pub mod table;

// Re-exports for convenience
pub use csv::export_csv;
pub use table::render_table;
