//! Users table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Users table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum UserConstraints {
    #[strum(serialize = "users_username_not_empty")]
    UsernameNotEmpty,
    #[strum(serialize = "users_password_hash_length")]
    PasswordHashLength,

    #[strum(serialize = "users_username_unique")]
    UsernameUnique,
    #[strum(serialize = "users_email_unique")]
    EmailUnique,
}

impl UserConstraints {
    /// Creates a new [`UserConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns whether the constraint is a uniqueness constraint.
    pub fn is_uniqueness(&self) -> bool {
        matches!(self, Self::UsernameUnique | Self::EmailUnique)
    }
}

impl From<UserConstraints> for String {
    #[inline]
    fn from(val: UserConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for UserConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
