use std::collections::HashMap;

use async_trait::async_trait;
use plaza_application::HeaderSummaryQueries;
use plaza_core::AppResult;
use plaza_domain::{PermissionSet, UserId};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct HeaderCounts {
    permissions: HashMap<UserId, PermissionSet>,
    unread_notifications: HashMap<UserId, u64>,
    unanswered_invites: HashMap<UserId, u64>,
    unresolved_flags: u64,
    project_approvals: u64,
    review_queue_count: u64,
}

/// In-memory header summary source for development and tests.
///
/// Users without a recorded permission set are declined.
#[derive(Default)]
pub struct InMemoryHeaderSummaryQueries {
    counts: RwLock<HeaderCounts>,
}

impl InMemoryHeaderSummaryQueries {
    /// Creates an empty source that declines every user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the effective global permission of a user.
    pub async fn set_permission(&self, user_id: UserId, permission: PermissionSet) {
        self.counts
            .write()
            .await
            .permissions
            .insert(user_id, permission);
    }

    /// Records the unread notification count of a user.
    pub async fn set_unread_notifications(&self, user_id: UserId, count: u64) {
        self.counts
            .write()
            .await
            .unread_notifications
            .insert(user_id, count);
    }

    /// Records the unanswered invite count of a user.
    pub async fn set_unanswered_invites(&self, user_id: UserId, count: u64) {
        self.counts
            .write()
            .await
            .unanswered_invites
            .insert(user_id, count);
    }

    /// Records platform-wide moderation counters.
    pub async fn set_moderation_counts(
        &self,
        unresolved_flags: u64,
        project_approvals: u64,
        review_queue_count: u64,
    ) {
        let mut counts = self.counts.write().await;
        counts.unresolved_flags = unresolved_flags;
        counts.project_approvals = project_approvals;
        counts.review_queue_count = review_queue_count;
    }
}

#[async_trait]
impl HeaderSummaryQueries for InMemoryHeaderSummaryQueries {
    async fn global_permission(&self, user_id: UserId) -> AppResult<Option<PermissionSet>> {
        let permission = self.counts.read().await.permissions.get(&user_id).copied();
        if permission.is_none() {
            debug!(user_id = %user_id, "no permission recorded, declining header summary");
        }

        Ok(permission)
    }

    async fn unread_notifications(&self, user_id: UserId) -> AppResult<u64> {
        Ok(self
            .counts
            .read()
            .await
            .unread_notifications
            .get(&user_id)
            .copied()
            .unwrap_or(0))
    }

    async fn unanswered_invites(&self, user_id: UserId) -> AppResult<u64> {
        Ok(self
            .counts
            .read()
            .await
            .unanswered_invites
            .get(&user_id)
            .copied()
            .unwrap_or(0))
    }

    async fn unresolved_flags(&self) -> AppResult<u64> {
        Ok(self.counts.read().await.unresolved_flags)
    }

    async fn project_approvals(&self) -> AppResult<u64> {
        Ok(self.counts.read().await.project_approvals)
    }

    async fn review_queue_count(&self) -> AppResult<u64> {
        Ok(self.counts.read().await.review_queue_count)
    }
}
