use std::str::FromStr;

use plaza_core::AppError;
use serde::{Deserialize, Serialize};

/// Platform-wide role attached to a user profile.
///
/// Profiles keep roles in precedence order; the first role is the one shown
/// first in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalRole {
    /// Full platform administrator.
    Admin,
    /// Moderates projects, flags and users.
    Moderator,
    /// Handles support requests.
    Support,
    /// Platform developer.
    Developer,
    /// Recognized partner account.
    Partner,
    /// Account representing an organization.
    Organization,
    /// Regular registered member.
    Member,
}

impl GlobalRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Support => "support",
            Self::Developer => "developer",
            Self::Partner => "partner",
            Self::Organization => "organization",
            Self::Member => "member",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[GlobalRole] = &[
            GlobalRole::Admin,
            GlobalRole::Moderator,
            GlobalRole::Support,
            GlobalRole::Developer,
            GlobalRole::Partner,
            GlobalRole::Organization,
            GlobalRole::Member,
        ];

        ALL
    }

    /// Returns whether the role belongs to platform staff.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Moderator | Self::Support)
    }
}

impl FromStr for GlobalRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            "support" => Ok(Self::Support),
            "developer" => Ok(Self::Developer),
            "partner" => Ok(Self::Partner),
            "organization" => Ok(Self::Organization),
            "member" => Ok(Self::Member),
            _ => Err(AppError::Validation(format!(
                "unknown global role '{value}'"
            ))),
        }
    }
}

/// Global permissions a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows viewing public information.
    ViewPublicInfo,
    /// Allows editing the caller's own user settings.
    EditOwnUserSettings,
    /// Allows creating projects.
    CreateProject,
    /// Allows reading moderation notes and handling flags.
    ModNotesAndFlags,
    /// Allows seeing hidden projects and versions.
    SeeHidden,
    /// Allows reviewing and approving projects.
    Reviewer,
    /// Allows editing any user's settings.
    EditAllUserSettings,
    /// Allows reading platform logs.
    ViewLogs,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewPublicInfo => "view_public_info",
            Self::EditOwnUserSettings => "edit_own_user_settings",
            Self::CreateProject => "create_project",
            Self::ModNotesAndFlags => "mod_notes_and_flags",
            Self::SeeHidden => "see_hidden",
            Self::Reviewer => "reviewer",
            Self::EditAllUserSettings => "edit_all_user_settings",
            Self::ViewLogs => "view_logs",
        }
    }

    /// Returns all known permissions in bit order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ViewPublicInfo,
            Permission::EditOwnUserSettings,
            Permission::CreateProject,
            Permission::ModNotesAndFlags,
            Permission::SeeHidden,
            Permission::Reviewer,
            Permission::EditAllUserSettings,
            Permission::ViewLogs,
        ];

        ALL
    }

    /// Returns the bit representing this permission inside a [`PermissionSet`].
    #[must_use]
    pub fn bit(&self) -> u64 {
        let index = match self {
            Self::ViewPublicInfo => 0,
            Self::EditOwnUserSettings => 1,
            Self::CreateProject => 2,
            Self::ModNotesAndFlags => 3,
            Self::SeeHidden => 4,
            Self::Reviewer => 5,
            Self::EditAllUserSettings => 6,
            Self::ViewLogs => 7,
        };

        1 << index
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

/// Set of global permissions, stored as a bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(u64);

impl PermissionSet {
    /// Creates an empty permission set.
    #[must_use]
    pub fn empty() -> Self {
        Self(0)
    }

    /// Creates a permission set from a stored bit mask.
    ///
    /// Bits without a known [`Permission`] are kept so that newer permissions
    /// survive a round trip through older code.
    #[must_use]
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Creates a permission set holding the given permissions.
    #[must_use]
    pub fn from_permissions(permissions: &[Permission]) -> Self {
        permissions
            .iter()
            .fold(Self::empty(), |set, permission| set.with(*permission))
    }

    /// Returns the underlying bit mask.
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Returns a copy of this set with one more permission.
    #[must_use]
    pub fn with(self, permission: Permission) -> Self {
        Self(self.0 | permission.bit())
    }

    /// Returns whether the set grants the permission.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    /// Returns the union of two sets.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns whether no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the known permissions held by this set in bit order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::all()
            .iter()
            .copied()
            .filter(|permission| self.contains(*permission))
    }
}
