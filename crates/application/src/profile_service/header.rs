use plaza_domain::{HeaderSummary, HeaderSummaryInput, Permission};

use super::*;

impl ProfileService {
    /// Builds a fresh header summary for a user.
    ///
    /// Returns `None` when the queries decline to supply a permission level.
    /// Moderation counters are only queried for users holding the matching
    /// permission and read as zero otherwise.
    pub async fn build_header_summary(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<HeaderSummary>> {
        let Some(global_permission) = self.header_queries.global_permission(user_id).await? else {
            return Ok(None);
        };

        let unread_notifications = self.header_queries.unread_notifications(user_id).await?;
        let unanswered_invites = self.header_queries.unanswered_invites(user_id).await?;

        let unresolved_flags = if global_permission.contains(Permission::ModNotesAndFlags) {
            self.header_queries.unresolved_flags().await?
        } else {
            0
        };

        let (project_approvals, review_queue_count) =
            if global_permission.contains(Permission::Reviewer) {
                (
                    self.header_queries.project_approvals().await?,
                    self.header_queries.review_queue_count().await?,
                )
            } else {
                (0, 0)
            };

        Ok(Some(HeaderSummary::new(HeaderSummaryInput {
            global_permission,
            unread_notifications,
            unanswered_invites,
            unresolved_flags,
            project_approvals,
            review_queue_count,
        })))
    }

    /// Rebuilds and replaces the header summary of a loaded profile.
    ///
    /// A declined rebuild keeps the previously attached summary. Returns
    /// whether the profile carries a summary afterwards.
    pub async fn refresh_header_summary(&self, profile: &mut PrivateProfile) -> AppResult<bool> {
        if let Some(summary) = self.build_header_summary(profile.id()).await? {
            profile.attach_header_summary(summary);
        }

        Ok(profile.header_summary().is_some())
    }
}
