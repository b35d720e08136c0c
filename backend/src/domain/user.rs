//! User data model.
//!
//! A [`User`] never carries its password. The bcrypt hash lives only in the
//! persistence adapters and travels through the
//! [`UserRepository`](crate::domain::ports::UserRepository) port as a
//! [`PasswordHash`](crate::domain::PasswordHash).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FileId;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
    UnknownRole,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::UnknownRole => write!(f, "role must be one of: admin, user"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    ///
    /// # Examples
    /// ```
    /// use concierge::domain::{UserId, UserValidationError};
    ///
    /// assert!(UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// assert_eq!(UserId::new(""), Err(UserValidationError::EmptyId));
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID, as read back from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum accepted length for an email address.
pub const EMAIL_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dotted domain part.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Login and contact address for a user.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`EMAIL_MAX`] characters.
/// - Shaped like `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use concierge::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  ada@example.com ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// assert!(EmailAddress::new("ada.example.com").is_err());
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let email = email.as_ref().trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authorisation role attached to every account.
///
/// New accounts receive [`UserRole::User`]; administrators are promoted out
/// of band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(UserValidationError::UnknownRole),
        }
    }
}

/// Application user as exposed to clients.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `email` satisfies [`EmailAddress`] validation.
/// - No password material is reachable from this type.
///
/// # Examples
/// ```
/// use concierge::domain::{EmailAddress, User, UserId, UserRole};
///
/// let email = EmailAddress::new("ada@example.com").expect("valid email");
/// let user = User::new(UserId::random(), email);
/// assert_eq!(user.role(), UserRole::User);
/// assert!(user.avatar_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    email: EmailAddress,
    role: UserRole,
    avatar_id: Option<FileId>,
}

impl User {
    /// Build a user with the default role and no avatar.
    pub fn new(id: UserId, email: EmailAddress) -> Self {
        Self {
            id,
            email,
            role: UserRole::default(),
            avatar_id: None,
        }
    }

    /// Replace the role.
    #[must_use]
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Attach an avatar file reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar_id: Option<FileId>) -> Self {
        self.avatar_id = avatar_id;
        self
    }

    /// Return a copy with a new email, keeping everything else.
    #[must_use]
    pub fn with_email(mut self, email: EmailAddress) -> Self {
        self.email = email;
        self
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Authorisation role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Avatar file, when one was uploaded at sign-up.
    pub fn avatar_id(&self) -> Option<&FileId> {
        self.avatar_id.as_ref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: String,
    email: String,
    role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    avatar_id: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            role,
            avatar_id,
        } = value;
        Self {
            id: id.into(),
            email: email.into(),
            role,
            avatar_id: avatar_id.map(|file| file.to_string()),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let avatar_id = value
            .avatar_id
            .map(|raw| FileId::new(raw).map_err(|_| UserValidationError::InvalidId))
            .transpose()?;
        Ok(Self::new(UserId::new(value.id)?, EmailAddress::new(value.email)?)
            .with_role(value.role)
            .with_avatar(avatar_id))
    }
}
