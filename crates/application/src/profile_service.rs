//! Profile retrieval and self-service account settings.
//!
//! Loads private profiles through [`ProfileRepository`], attaches header
//! summaries assembled from [`HeaderSummaryQueries`], and derives public
//! profiles for any viewer. Mutating operations are refused for locked
//! accounts.

use std::sync::Arc;

use plaza_core::{AppError, AppResult};
use plaza_domain::{PrivateProfile, PublicProfile, UserId};

use crate::{HeaderSummaryQueries, ProfileRepository};

mod account;
mod header;

#[cfg(test)]
mod tests;

/// Default maximum tagline length in characters.
pub const DEFAULT_MAX_TAGLINE_LENGTH: usize = 100;

/// Runtime settings for [`ProfileService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSettings {
    /// Whether `current_user` attaches a header summary.
    pub include_header_summary: bool,
    /// Maximum tagline length in characters.
    pub max_tagline_length: usize,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            include_header_summary: true,
            max_tagline_length: DEFAULT_MAX_TAGLINE_LENGTH,
        }
    }
}

/// Application service for user profiles.
#[derive(Clone)]
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
    header_queries: Arc<dyn HeaderSummaryQueries>,
    settings: ProfileSettings,
}

impl ProfileService {
    /// Creates a new profile service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        header_queries: Arc<dyn HeaderSummaryQueries>,
        settings: ProfileSettings,
    ) -> Self {
        Self {
            repository,
            header_queries,
            settings,
        }
    }

    /// Returns the active settings.
    #[must_use]
    pub fn settings(&self) -> ProfileSettings {
        self.settings
    }

    /// Loads the signed-in user's private profile.
    ///
    /// Attaches a header summary when enabled in settings and the summary
    /// queries do not decline it.
    pub async fn current_user(&self, user_id: UserId) -> AppResult<PrivateProfile> {
        let mut profile = self.load_by_id(user_id).await?;

        if self.settings.include_header_summary
            && let Some(summary) = self.build_header_summary(user_id).await?
        {
            profile.attach_header_summary(summary);
        }

        Ok(profile)
    }

    /// Loads a profile by user name and returns its public view.
    pub async fn public_profile(&self, name: &str) -> AppResult<PublicProfile> {
        let profile = self
            .repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{name}' not found")))?;

        Ok(profile.to_public_profile())
    }

    async fn load_by_id(&self, user_id: UserId) -> AppResult<PrivateProfile> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))
    }
}
