use plaza_core::NonEmptyString;
use plaza_domain::PromptId;

use super::*;

/// Maximum length of one locale tag segment.
const LANGUAGE_SEGMENT_MAX_LENGTH: usize = 8;

impl ProfileService {
    /// Replaces the tagline of the signed-in user and returns the new public view.
    ///
    /// Blank taglines clear the field.
    pub async fn update_tagline(
        &self,
        user_id: UserId,
        tagline: Option<String>,
    ) -> AppResult<PublicProfile> {
        let mut profile = self.load_by_id(user_id).await?;
        profile.ensure_unlocked()?;

        let tagline = tagline.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        if let Some(value) = tagline.as_deref() {
            let length = value.chars().count();
            if length > self.settings.max_tagline_length {
                return Err(AppError::Validation(format!(
                    "tagline must not exceed {} characters",
                    self.settings.max_tagline_length
                )));
            }
        }

        self.repository
            .update_tagline(user_id, tagline.as_deref())
            .await?;
        profile.set_tagline(tagline);

        Ok(profile.to_public_profile())
    }

    /// Replaces the preferred locale tag of the signed-in user.
    pub async fn update_language(&self, user_id: UserId, language: String) -> AppResult<()> {
        let profile = self.load_by_id(user_id).await?;
        profile.ensure_unlocked()?;

        let language = validate_language(language)?;
        self.repository
            .update_language(user_id, language.as_str())
            .await
    }

    /// Records that the signed-in user acknowledged a prompt.
    ///
    /// Acknowledging a prompt twice is a no-op.
    pub async fn acknowledge_prompt(&self, user_id: UserId, prompt: PromptId) -> AppResult<()> {
        let profile = self.load_by_id(user_id).await?;
        profile.ensure_unlocked()?;

        if profile.has_read_prompt(prompt) {
            return Ok(());
        }

        self.repository.add_read_prompt(user_id, prompt).await
    }
}

/// Checks the shape of a locale tag such as `en`, `pt-BR` or `zh_Hant`.
fn validate_language(language: String) -> AppResult<NonEmptyString> {
    let language = NonEmptyString::new(language.trim())?;

    let well_formed = language.as_str().split(['-', '_']).all(|segment| {
        (1..=LANGUAGE_SEGMENT_MAX_LENGTH).contains(&segment.len())
            && segment.chars().all(|character| character.is_ascii_alphanumeric())
    });

    if !well_formed {
        return Err(AppError::Validation(format!(
            "invalid language tag '{}'",
            language.as_str()
        )));
    }

    Ok(language)
}
