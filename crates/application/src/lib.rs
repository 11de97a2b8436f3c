//! Application services and ports.

#![forbid(unsafe_code)]

mod profile_ports;
mod profile_service;

pub use profile_ports::{HeaderSummaryQueries, ProfileRepository};
pub use profile_service::{DEFAULT_MAX_TAGLINE_LENGTH, ProfileService, ProfileSettings};
