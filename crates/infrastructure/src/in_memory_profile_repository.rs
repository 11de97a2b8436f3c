use std::collections::HashMap;

use async_trait::async_trait;
use plaza_application::ProfileRepository;
use plaza_core::{AppError, AppResult};
use plaza_domain::{PrivateProfile, PrivateProfileInput, PromptId, UserId};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory profile repository for development and tests.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<UserId, PrivateProfile>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory profile repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new profile.
    ///
    /// Rejects ids and names (compared case-insensitively) that already exist.
    pub async fn insert(&self, input: PrivateProfileInput) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;

        if profiles.contains_key(&input.id) {
            return Err(AppError::Conflict(format!(
                "user {} already exists",
                input.id
            )));
        }

        if profiles
            .values()
            .any(|profile| profile.name().eq_ignore_ascii_case(input.name.as_str()))
        {
            return Err(AppError::Conflict(format!(
                "user name '{}' is already taken",
                input.name
            )));
        }

        let profile = PrivateProfile::new(input);
        debug!(user_id = %profile.id(), name = %profile.name(), "stored profile");
        profiles.insert(profile.id(), profile);

        Ok(())
    }

    async fn update(
        &self,
        user_id: UserId,
        change: impl FnOnce(&mut PrivateProfile) + Send,
    ) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))?;

        change(profile);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<PrivateProfile>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<PrivateProfile>> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .find(|profile| profile.name().eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn update_tagline(&self, user_id: UserId, tagline: Option<&str>) -> AppResult<()> {
        let tagline = tagline.map(str::to_owned);
        self.update(user_id, |profile| profile.set_tagline(tagline))
            .await?;

        debug!(user_id = %user_id, "updated profile tagline");
        Ok(())
    }

    async fn update_language(&self, user_id: UserId, language: &str) -> AppResult<()> {
        let language = language.to_owned();
        self.update(user_id, |profile| profile.set_language(language))
            .await?;

        debug!(user_id = %user_id, "updated profile language");
        Ok(())
    }

    async fn add_read_prompt(&self, user_id: UserId, prompt: PromptId) -> AppResult<()> {
        self.update(user_id, |profile| {
            if profile.mark_prompt_read(prompt) {
                debug!(user_id = %user_id, prompt = %prompt, "recorded read prompt");
            }
        })
        .await
    }
}
