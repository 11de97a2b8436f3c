//! JSON seed data for the in-memory adapters.

use std::collections::HashMap;
use std::path::Path;

use plaza_core::{AppError, AppResult};
use plaza_domain::{Permission, PermissionSet, PrivateProfileInput, UserId};
use plaza_infrastructure::{InMemoryHeaderSummaryQueries, InMemoryProfileRepository};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct Seed {
    profiles: Vec<PrivateProfileInput>,
    #[serde(default)]
    header: HeaderSeed,
}

/// Header counters keyed by user id.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeaderSeed {
    permissions: HashMap<i64, PermissionSeed>,
    unread_notifications: HashMap<i64, u64>,
    unanswered_invites: HashMap<i64, u64>,
    unresolved_flags: u64,
    project_approvals: u64,
    review_queue_count: u64,
}

/// Permission entry given either as a stored bit mask or as permission names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PermissionSeed {
    Bits(PermissionSet),
    Names(Vec<Permission>),
}

impl PermissionSeed {
    fn to_set(&self) -> PermissionSet {
        match self {
            Self::Bits(set) => *set,
            Self::Names(permissions) => PermissionSet::from_permissions(permissions),
        }
    }
}

impl Seed {
    pub fn read(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|error| {
            AppError::Internal(format!("failed to read seed file {}: {error}", path.display()))
        })?;

        Self::parse(raw.as_str())
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|error| AppError::Validation(format!("invalid seed file: {error}")))
    }

    /// Finds the id of a seeded user by name (case-insensitive).
    pub fn user_id(&self, name: &str) -> Option<UserId> {
        self.profiles
            .iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
            .map(|profile| profile.id)
    }

    pub async fn apply(
        &self,
        repository: &InMemoryProfileRepository,
        queries: &InMemoryHeaderSummaryQueries,
    ) -> AppResult<()> {
        for profile in &self.profiles {
            repository.insert(profile.clone()).await?;
        }

        let header = &self.header;
        for (user_id, permission) in &header.permissions {
            queries
                .set_permission(UserId::new(*user_id), permission.to_set())
                .await;
        }
        for (user_id, count) in &header.unread_notifications {
            queries
                .set_unread_notifications(UserId::new(*user_id), *count)
                .await;
        }
        for (user_id, count) in &header.unanswered_invites {
            queries
                .set_unanswered_invites(UserId::new(*user_id), *count)
                .await;
        }
        queries
            .set_moderation_counts(
                header.unresolved_flags,
                header.project_approvals,
                header.review_queue_count,
            )
            .await;

        info!(
            profiles = self.profiles.len(),
            summaries = header.permissions.len(),
            "seed data loaded"
        );

        Ok(())
    }
}
