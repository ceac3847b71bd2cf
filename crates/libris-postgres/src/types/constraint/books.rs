//! Books table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Books table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum BookConstraints {
    #[strum(serialize = "books_title_not_empty")]
    TitleNotEmpty,
    #[strum(serialize = "books_author_not_empty")]
    AuthorNotEmpty,

    #[strum(serialize = "books_title_author_unique")]
    TitleAuthorUnique,
}

impl BookConstraints {
    /// Creates a new [`BookConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns whether the constraint is a uniqueness constraint.
    pub fn is_uniqueness(&self) -> bool {
        matches!(self, Self::TitleAuthorUnique)
    }
}

impl From<BookConstraints> for String {
    #[inline]
    fn from(val: BookConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for BookConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
