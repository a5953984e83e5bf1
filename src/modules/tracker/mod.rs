pub mod client;
pub mod query;
pub mod response;
pub mod retry_policy;

// Re-exports for convenience
pub use client::{SearchBackend, TrackerClient};
pub use query::{build_query, expand_variants, QueryVariant, VariantLabel};
pub use response::{parse_search_response, RemoteCandidate, SearchResponse};
pub use retry_policy::RetryPolicy;

#[cfg(test)]
pub use client::MockSearchBackend;
