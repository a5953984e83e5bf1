pub mod dispatch;
pub mod filter;
pub mod row;
pub mod sort;

// Re-exports for convenience
pub use dispatch::{DispatchOptions, Dispatcher, MatchStrategy};
pub use filter::{filter_rows, ReportFilter};
pub use row::{ReportRow, RowOutcome};
pub use sort::{sort_items, SortPolicy};
