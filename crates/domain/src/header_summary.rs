//! Header summary aggregate shown to the signed-in user.

use serde::{Deserialize, Serialize};

use crate::PermissionSet;

/// Permission level and pending-work counters used to render the UI header.
///
/// Immutable once built. To refresh, build a new summary and attach it in
/// place of the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSummary {
    global_permission: PermissionSet,
    unread_notifications: u64,
    unanswered_invites: u64,
    unresolved_flags: u64,
    project_approvals: u64,
    review_queue_count: u64,
}

/// Input payload used to build a header summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSummaryInput {
    /// Effective global permission of the caller at build time.
    pub global_permission: PermissionSet,
    /// Notifications the user has not read.
    pub unread_notifications: u64,
    /// Project or organization invites awaiting an answer.
    pub unanswered_invites: u64,
    /// Flags not yet resolved by moderation.
    pub unresolved_flags: u64,
    /// Projects waiting for approval.
    pub project_approvals: u64,
    /// Versions waiting in the review queue.
    pub review_queue_count: u64,
}

impl HeaderSummary {
    /// Builds a summary from collaborator-supplied values.
    #[must_use]
    pub fn new(input: HeaderSummaryInput) -> Self {
        let HeaderSummaryInput {
            global_permission,
            unread_notifications,
            unanswered_invites,
            unresolved_flags,
            project_approvals,
            review_queue_count,
        } = input;

        Self {
            global_permission,
            unread_notifications,
            unanswered_invites,
            unresolved_flags,
            project_approvals,
            review_queue_count,
        }
    }

    /// Returns the caller's effective global permission.
    #[must_use]
    pub fn global_permission(&self) -> PermissionSet {
        self.global_permission
    }

    /// Returns the number of unread notifications.
    #[must_use]
    pub fn unread_notifications(&self) -> u64 {
        self.unread_notifications
    }

    /// Returns the number of invites awaiting an answer.
    #[must_use]
    pub fn unanswered_invites(&self) -> u64 {
        self.unanswered_invites
    }

    /// Returns the number of unresolved flags.
    #[must_use]
    pub fn unresolved_flags(&self) -> u64 {
        self.unresolved_flags
    }

    /// Returns the number of projects awaiting approval.
    #[must_use]
    pub fn project_approvals(&self) -> u64 {
        self.project_approvals
    }

    /// Returns the review queue length.
    #[must_use]
    pub fn review_queue_count(&self) -> u64 {
        self.review_queue_count
    }

    /// Returns whether every counter is zero.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.unread_notifications == 0
            && self.unanswered_invites == 0
            && self.unresolved_flags == 0
            && self.project_approvals == 0
            && self.review_queue_count == 0
    }
}

impl From<HeaderSummaryInput> for HeaderSummary {
    fn from(input: HeaderSummaryInput) -> Self {
        Self::new(input)
    }
}
