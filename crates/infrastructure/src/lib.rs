//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_header_summary_queries;
mod in_memory_profile_repository;

pub use in_memory_header_summary_queries::InMemoryHeaderSummaryQueries;
pub use in_memory_profile_repository::InMemoryProfileRepository;
