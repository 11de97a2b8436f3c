//! Public and private user profile views.
//!
//! [`PrivateProfile`] embeds a [`PublicProfile`] and adds the fields that only
//! the account owner or privileged callers may see. The public view is derived
//! through [`PrivateProfile::to_public_profile`], which copies an explicit
//! allow-list of fields.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use plaza_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{GlobalRole, HeaderSummary, PromptId, UserId};

/// Profile fields that are safe to show to any viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    created_at: DateTime<Utc>,
    name: String,
    tagline: Option<String>,
    join_date: DateTime<Utc>,
    roles: Vec<GlobalRole>,
    project_count: u64,
}

impl PublicProfile {
    /// Creates a public profile.
    #[must_use]
    pub fn new(
        created_at: DateTime<Utc>,
        name: impl Into<String>,
        tagline: Option<String>,
        join_date: DateTime<Utc>,
        roles: Vec<GlobalRole>,
        project_count: u64,
    ) -> Self {
        Self {
            created_at,
            name: name.into(),
            tagline,
            join_date,
            roles,
            project_count,
        }
    }

    /// Returns when the account record was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the unique user name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the optional tagline.
    #[must_use]
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }

    /// Returns when the user joined the platform.
    #[must_use]
    pub fn join_date(&self) -> DateTime<Utc> {
        self.join_date
    }

    /// Returns global roles in precedence order.
    #[must_use]
    pub fn roles(&self) -> &[GlobalRole] {
        self.roles.as_slice()
    }

    /// Returns the cached number of projects owned by the user.
    #[must_use]
    pub fn project_count(&self) -> u64 {
        self.project_count
    }
}

/// Input payload used to construct a private profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateProfileInput {
    /// Account primary key.
    pub id: UserId,
    /// Account record creation time.
    pub created_at: DateTime<Utc>,
    /// Unique user name.
    pub name: String,
    /// Optional tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Platform join time.
    pub join_date: DateTime<Utc>,
    /// Global roles in precedence order.
    #[serde(default)]
    pub roles: Vec<GlobalRole>,
    /// Cached project count.
    #[serde(default)]
    pub project_count: u64,
    /// Prompts the user already acknowledged.
    #[serde(default)]
    pub read_prompts: BTreeSet<PromptId>,
    /// Administrative freeze flag.
    #[serde(default)]
    pub locked: bool,
    /// Preferred locale tag.
    pub language: String,
}

/// Full profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateProfile {
    #[serde(flatten)]
    profile: PublicProfile,
    id: UserId,
    header_summary: Option<HeaderSummary>,
    read_prompts: BTreeSet<PromptId>,
    locked: bool,
    language: String,
}

impl PrivateProfile {
    /// Creates a private profile without a header summary.
    #[must_use]
    pub fn new(input: PrivateProfileInput) -> Self {
        let PrivateProfileInput {
            id,
            created_at,
            name,
            tagline,
            join_date,
            roles,
            project_count,
            read_prompts,
            locked,
            language,
        } = input;

        Self {
            profile: PublicProfile::new(created_at, name, tagline, join_date, roles, project_count),
            id,
            header_summary: None,
            read_prompts,
            locked,
            language,
        }
    }

    /// Returns the embedded public fields by reference.
    #[must_use]
    pub fn profile(&self) -> &PublicProfile {
        &self.profile
    }

    /// Returns the account primary key.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the unique user name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.profile.name()
    }

    /// Returns the attached header summary, if any.
    ///
    /// `None` means no summary was attached, which is distinct from a summary
    /// whose counters are all zero.
    #[must_use]
    pub fn header_summary(&self) -> Option<&HeaderSummary> {
        self.header_summary.as_ref()
    }

    /// Attaches a header summary, replacing any previous one wholesale.
    ///
    /// Returns the summary that was replaced.
    pub fn attach_header_summary(&mut self, summary: HeaderSummary) -> Option<HeaderSummary> {
        self.header_summary.replace(summary)
    }

    /// Builder form of [`Self::attach_header_summary`].
    #[must_use]
    pub fn with_header_summary(mut self, summary: HeaderSummary) -> Self {
        self.header_summary = Some(summary);
        self
    }

    /// Returns acknowledged prompts in ascending order.
    #[must_use]
    pub fn read_prompts(&self) -> &BTreeSet<PromptId> {
        &self.read_prompts
    }

    /// Returns whether the user already acknowledged a prompt.
    #[must_use]
    pub fn has_read_prompt(&self, prompt: PromptId) -> bool {
        self.read_prompts.contains(&prompt)
    }

    /// Records an acknowledged prompt. Returns `false` if it was already read.
    pub fn mark_prompt_read(&mut self, prompt: PromptId) -> bool {
        self.read_prompts.insert(prompt)
    }

    /// Returns whether the account is administratively frozen.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Fails with [`AppError::Forbidden`] when the account is locked.
    pub fn ensure_unlocked(&self) -> AppResult<()> {
        if self.locked {
            return Err(AppError::Forbidden(format!(
                "account '{}' is locked",
                self.profile.name()
            )));
        }

        Ok(())
    }

    /// Returns the preferred locale tag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_str()
    }

    /// Replaces the tagline.
    pub fn set_tagline(&mut self, tagline: Option<String>) {
        self.profile.tagline = tagline;
    }

    /// Replaces the preferred locale tag.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Projects the fields that are safe to show to any viewer.
    #[must_use]
    pub fn to_public_profile(&self) -> PublicProfile {
        let PublicProfile {
            created_at,
            name,
            tagline,
            join_date,
            roles,
            project_count,
        } = &self.profile;

        PublicProfile {
            created_at: *created_at,
            name: name.clone(),
            tagline: tagline.clone(),
            join_date: *join_date,
            roles: roles.to_vec(),
            project_count: *project_count,
        }
    }
}

impl From<&PrivateProfile> for PublicProfile {
    fn from(profile: &PrivateProfile) -> Self {
        profile.to_public_profile()
    }
}
