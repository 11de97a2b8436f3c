use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use plaza_core::{AppError, AppResult};
use plaza_domain::{
    GlobalRole, HeaderSummary, HeaderSummaryInput, Permission, PermissionSet, PrivateProfile,
    PrivateProfileInput, PromptId, UserId,
};

use super::{ProfileService, ProfileSettings};
use crate::{HeaderSummaryQueries, ProfileRepository};

#[derive(Default)]
struct FakeProfileRepository {
    profiles: Mutex<HashMap<UserId, PrivateProfile>>,
}

impl FakeProfileRepository {
    fn with_profiles(inputs: Vec<PrivateProfileInput>) -> Self {
        let profiles = inputs
            .into_iter()
            .map(|input| (input.id, PrivateProfile::new(input)))
            .collect();

        Self {
            profiles: Mutex::new(profiles),
        }
    }

    fn stored(&self, user_id: UserId) -> AppResult<PrivateProfile> {
        self.lock()?
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))
    }

    fn lock(
        &self,
    ) -> AppResult<std::sync::MutexGuard<'_, HashMap<UserId, PrivateProfile>>> {
        self.profiles.lock().map_err(|error| {
            AppError::Internal(format!("failed to lock profile repository state: {error}"))
        })
    }

    fn update(
        &self,
        user_id: UserId,
        change: impl FnOnce(&mut PrivateProfile),
    ) -> AppResult<()> {
        let mut profiles = self.lock()?;
        let profile = profiles
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {user_id} not found")))?;
        change(profile);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for FakeProfileRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<PrivateProfile>> {
        Ok(self.lock()?.get(&user_id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<PrivateProfile>> {
        Ok(self
            .lock()?
            .values()
            .find(|profile| profile.name().eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn update_tagline(&self, user_id: UserId, tagline: Option<&str>) -> AppResult<()> {
        self.update(user_id, |profile| {
            profile.set_tagline(tagline.map(str::to_owned));
        })
    }

    async fn update_language(&self, user_id: UserId, language: &str) -> AppResult<()> {
        self.update(user_id, |profile| profile.set_language(language))
    }

    async fn add_read_prompt(&self, user_id: UserId, prompt: PromptId) -> AppResult<()> {
        self.update(user_id, |profile| {
            profile.mark_prompt_read(prompt);
        })
    }
}

#[derive(Default)]
struct FakeHeaderQueries {
    permissions: HashMap<UserId, PermissionSet>,
    unread_notifications: u64,
    unanswered_invites: u64,
    unresolved_flags: u64,
    project_approvals: u64,
    review_queue_count: u64,
    moderation_queries: AtomicUsize,
}

#[async_trait]
impl HeaderSummaryQueries for FakeHeaderQueries {
    async fn global_permission(&self, user_id: UserId) -> AppResult<Option<PermissionSet>> {
        Ok(self.permissions.get(&user_id).copied())
    }

    async fn unread_notifications(&self, _user_id: UserId) -> AppResult<u64> {
        Ok(self.unread_notifications)
    }

    async fn unanswered_invites(&self, _user_id: UserId) -> AppResult<u64> {
        Ok(self.unanswered_invites)
    }

    async fn unresolved_flags(&self) -> AppResult<u64> {
        self.moderation_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.unresolved_flags)
    }

    async fn project_approvals(&self) -> AppResult<u64> {
        self.moderation_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.project_approvals)
    }

    async fn review_queue_count(&self) -> AppResult<u64> {
        self.moderation_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.review_queue_count)
    }
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(seconds, 0).unwrap_or_default()
}

fn profile_input(id: i64, name: &str, locked: bool) -> PrivateProfileInput {
    PrivateProfileInput {
        id: UserId::new(id),
        created_at: timestamp(1_650_000_000),
        name: name.to_owned(),
        tagline: Some("hi".to_owned()),
        join_date: timestamp(1_650_000_000),
        roles: vec![GlobalRole::Member],
        project_count: 3,
        read_prompts: BTreeSet::from([PromptId::new(1), PromptId::new(2)]),
        locked,
        language: "en".to_owned(),
    }
}

fn admin_permissions() -> PermissionSet {
    PermissionSet::from_permissions(Permission::all())
}

fn admin_queries() -> FakeHeaderQueries {
    FakeHeaderQueries {
        permissions: HashMap::from([(UserId::new(7), admin_permissions())]),
        unread_notifications: 5,
        unanswered_invites: 0,
        unresolved_flags: 2,
        project_approvals: 1,
        review_queue_count: 0,
        ..FakeHeaderQueries::default()
    }
}

fn build_service(
    repository: Arc<FakeProfileRepository>,
    queries: Arc<FakeHeaderQueries>,
    settings: ProfileSettings,
) -> ProfileService {
    ProfileService::new(repository, queries, settings)
}

fn default_repository() -> Arc<FakeProfileRepository> {
    Arc::new(FakeProfileRepository::with_profiles(vec![
        profile_input(7, "alice", false),
        profile_input(8, "frozen", true),
    ]))
}

#[tokio::test]
async fn current_user_attaches_header_summary() {
    let service = build_service(
        default_repository(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );

    let profile = service.current_user(UserId::new(7)).await;

    let Ok(profile) = profile else {
        panic!("profile should load");
    };
    assert_eq!(
        profile.header_summary().copied(),
        Some(HeaderSummary::new(HeaderSummaryInput {
            global_permission: admin_permissions(),
            unread_notifications: 5,
            unanswered_invites: 0,
            unresolved_flags: 2,
            project_approvals: 1,
            review_queue_count: 0,
        }))
    );
}

#[tokio::test]
async fn current_user_leaves_summary_absent_when_declined() {
    let service = build_service(
        default_repository(),
        Arc::new(FakeHeaderQueries::default()),
        ProfileSettings::default(),
    );

    let profile = service.current_user(UserId::new(7)).await;

    assert!(profile.is_ok_and(|profile| profile.header_summary().is_none()));
}

#[tokio::test]
async fn current_user_skips_summary_when_disabled() {
    let queries = Arc::new(admin_queries());
    let service = build_service(
        default_repository(),
        queries.clone(),
        ProfileSettings {
            include_header_summary: false,
            ..ProfileSettings::default()
        },
    );

    let profile = service.current_user(UserId::new(7)).await;

    assert!(!service.settings().include_header_summary);
    assert!(profile.is_ok_and(|profile| profile.header_summary().is_none()));
    assert_eq!(queries.moderation_queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn current_user_reports_missing_account() {
    let service = build_service(
        default_repository(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );

    let result = service.current_user(UserId::new(404)).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn moderation_counters_require_permission() {
    let member = PermissionSet::from_permissions(&[
        Permission::ViewPublicInfo,
        Permission::EditOwnUserSettings,
    ]);
    let queries = Arc::new(FakeHeaderQueries {
        permissions: HashMap::from([(UserId::new(7), member)]),
        unread_notifications: 4,
        unanswered_invites: 1,
        unresolved_flags: 9,
        project_approvals: 9,
        review_queue_count: 9,
        ..FakeHeaderQueries::default()
    });
    let service = build_service(
        default_repository(),
        queries.clone(),
        ProfileSettings::default(),
    );

    let summary = service.build_header_summary(UserId::new(7)).await;

    let Ok(Some(summary)) = summary else {
        panic!("summary should be built");
    };
    assert_eq!(summary.unread_notifications(), 4);
    assert_eq!(summary.unanswered_invites(), 1);
    assert_eq!(summary.unresolved_flags(), 0);
    assert_eq!(summary.project_approvals(), 0);
    assert_eq!(summary.review_queue_count(), 0);
    assert_eq!(queries.moderation_queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn refresh_replaces_summary_wholesale() {
    let service = build_service(
        default_repository(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );
    let mut profile = PrivateProfile::new(profile_input(7, "alice", false)).with_header_summary(
        HeaderSummary::new(HeaderSummaryInput {
            global_permission: PermissionSet::empty(),
            unread_notifications: 40,
            unanswered_invites: 3,
            unresolved_flags: 0,
            project_approvals: 0,
            review_queue_count: 12,
        }),
    );

    let refreshed = service.refresh_header_summary(&mut profile).await;

    assert!(matches!(refreshed, Ok(true)));
    let summary = profile.header_summary().copied();
    assert_eq!(summary.map(|value| value.unread_notifications()), Some(5));
    assert_eq!(summary.map(|value| value.unanswered_invites()), Some(0));
    assert_eq!(summary.map(|value| value.review_queue_count()), Some(0));
    assert_eq!(
        summary.map(|value| value.global_permission()),
        Some(admin_permissions())
    );
}

#[tokio::test]
async fn declined_refresh_keeps_previous_summary() {
    let service = build_service(
        default_repository(),
        Arc::new(FakeHeaderQueries::default()),
        ProfileSettings::default(),
    );
    let previous = HeaderSummary::new(HeaderSummaryInput {
        unread_notifications: 2,
        ..HeaderSummaryInput::default()
    });
    let mut profile =
        PrivateProfile::new(profile_input(7, "alice", false)).with_header_summary(previous);

    let refreshed = service.refresh_header_summary(&mut profile).await;

    assert!(matches!(refreshed, Ok(true)));
    assert_eq!(profile.header_summary().copied(), Some(previous));
}

#[tokio::test]
async fn public_profile_is_found_case_insensitively() {
    let service = build_service(
        default_repository(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );

    let public = service.public_profile("ALICE").await;

    let Ok(public) = public else {
        panic!("public profile should load");
    };
    assert_eq!(public.name(), "alice");
    assert_eq!(public.tagline(), Some("hi"));
    assert_eq!(public.roles(), &[GlobalRole::Member]);
    assert_eq!(public.project_count(), 3);
}

#[tokio::test]
async fn update_tagline_trims_and_persists() {
    let repository = default_repository();
    let service = build_service(
        repository.clone(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );

    let public = service
        .update_tagline(UserId::new(7), Some("  building things  ".to_owned()))
        .await;

    assert!(public.is_ok_and(|public| public.tagline() == Some("building things")));
    let stored = repository.stored(UserId::new(7));
    assert!(stored.is_ok_and(|profile| profile.profile().tagline() == Some("building things")));
}

#[tokio::test]
async fn blank_tagline_clears_field() {
    let repository = default_repository();
    let service = build_service(
        repository.clone(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );

    let public = service
        .update_tagline(UserId::new(7), Some("   ".to_owned()))
        .await;

    assert!(public.is_ok_and(|public| public.tagline().is_none()));
}

#[tokio::test]
async fn overlong_tagline_is_rejected() {
    let repository = default_repository();
    let service = build_service(
        repository.clone(),
        Arc::new(admin_queries()),
        ProfileSettings {
            max_tagline_length: 5,
            ..ProfileSettings::default()
        },
    );

    let result = service
        .update_tagline(UserId::new(7), Some("abcdef".to_owned()))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    let stored = repository.stored(UserId::new(7));
    assert!(stored.is_ok_and(|profile| profile.profile().tagline() == Some("hi")));
}

#[tokio::test]
async fn locked_account_cannot_mutate() {
    let repository = default_repository();
    let service = build_service(
        repository.clone(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );
    let frozen = UserId::new(8);

    let tagline = service.update_tagline(frozen, None).await;
    let language = service.update_language(frozen, "de".to_owned()).await;
    let prompt = service.acknowledge_prompt(frozen, PromptId::new(9)).await;

    assert!(matches!(tagline, Err(AppError::Forbidden(_))));
    assert!(matches!(language, Err(AppError::Forbidden(_))));
    assert!(matches!(prompt, Err(AppError::Forbidden(_))));
    let stored = repository.stored(frozen);
    assert!(stored.is_ok_and(|profile| {
        profile.language() == "en" && !profile.has_read_prompt(PromptId::new(9))
    }));
}

#[tokio::test]
async fn update_language_validates_tag() {
    let repository = default_repository();
    let service = build_service(
        repository.clone(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );

    let accepted = service.update_language(UserId::new(7), " pt-BR ".to_owned()).await;
    let blank = service.update_language(UserId::new(7), "  ".to_owned()).await;
    let malformed = service
        .update_language(UserId::new(7), "en--US".to_owned())
        .await;
    let symbols = service.update_language(UserId::new(7), "en!".to_owned()).await;

    assert!(accepted.is_ok());
    assert!(matches!(blank, Err(AppError::Validation(_))));
    assert!(matches!(malformed, Err(AppError::Validation(_))));
    assert!(matches!(symbols, Err(AppError::Validation(_))));
    let stored = repository.stored(UserId::new(7));
    assert!(stored.is_ok_and(|profile| profile.language() == "pt-BR"));
}

#[tokio::test]
async fn acknowledge_prompt_appends_once() {
    let repository = default_repository();
    let service = build_service(
        repository.clone(),
        Arc::new(admin_queries()),
        ProfileSettings::default(),
    );

    let first = service
        .acknowledge_prompt(UserId::new(7), PromptId::new(3))
        .await;
    let repeated = service
        .acknowledge_prompt(UserId::new(7), PromptId::new(3))
        .await;

    assert!(first.is_ok());
    assert!(repeated.is_ok());
    let stored = repository.stored(UserId::new(7));
    assert!(stored.is_ok_and(|profile| {
        profile.read_prompts().iter().map(PromptId::as_i32).collect::<Vec<_>>() == vec![1, 2, 3]
    }));
}
