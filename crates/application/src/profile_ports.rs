//! Ports implemented by profile data collaborators.

use async_trait::async_trait;
use plaza_core::AppResult;
use plaza_domain::{PermissionSet, PrivateProfile, PromptId, UserId};

/// Repository port for user profile persistence.
///
/// Returned profiles never carry a header summary; summaries are attached by
/// the service after loading.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile by its primary key.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<PrivateProfile>>;

    /// Finds a profile by user name (case-insensitive).
    async fn find_by_name(&self, name: &str) -> AppResult<Option<PrivateProfile>>;

    /// Replaces the tagline of a profile.
    async fn update_tagline(&self, user_id: UserId, tagline: Option<&str>) -> AppResult<()>;

    /// Replaces the preferred locale tag of a profile.
    async fn update_language(&self, user_id: UserId, language: &str) -> AppResult<()>;

    /// Appends a prompt to the set of acknowledged prompts.
    async fn add_read_prompt(&self, user_id: UserId, prompt: PromptId) -> AppResult<()>;
}

/// Query port supplying the inputs of a header summary.
///
/// Each counter comes from an independent query.
#[async_trait]
pub trait HeaderSummaryQueries: Send + Sync {
    /// Returns the effective global permission of a user.
    ///
    /// `None` declines the summary for this user altogether.
    async fn global_permission(&self, user_id: UserId) -> AppResult<Option<PermissionSet>>;

    /// Counts notifications the user has not read.
    async fn unread_notifications(&self, user_id: UserId) -> AppResult<u64>;

    /// Counts invites addressed to the user that await an answer.
    async fn unanswered_invites(&self, user_id: UserId) -> AppResult<u64>;

    /// Counts unresolved flags across the platform.
    async fn unresolved_flags(&self) -> AppResult<u64>;

    /// Counts projects waiting for approval.
    async fn project_approvals(&self) -> AppResult<u64>;

    /// Counts versions waiting in the review queue.
    async fn review_queue_count(&self) -> AppResult<u64>;
}
