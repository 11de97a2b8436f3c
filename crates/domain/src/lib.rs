//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod header_summary;
mod profile;
mod security;
mod user;

pub use header_summary::{HeaderSummary, HeaderSummaryInput};
pub use profile::{PrivateProfile, PrivateProfileInput, PublicProfile};
pub use security::{GlobalRole, Permission, PermissionSet};
pub use user::{PromptId, UserId};
