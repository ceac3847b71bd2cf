//! Database constraint violations by table.

mod books;
mod users;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::books::BookConstraints;
pub use self::users::UserConstraints;

/// Any known constraint of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    User(UserConstraints),
    Book(BookConstraints),
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// ```
    /// use libris_postgres::types::ConstraintViolation;
    ///
    /// assert!(ConstraintViolation::new("users_email_unique").is_some());
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        match constraint.split('_').next()? {
            "users" => UserConstraints::new(constraint).map(Self::User),
            "books" => BookConstraints::new(constraint).map(Self::Book),
            _ => None,
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::Book(_) => "books",
        }
    }

    /// Returns whether the constraint is a uniqueness constraint.
    pub fn is_uniqueness(&self) -> bool {
        match self {
            ConstraintViolation::User(c) => c.is_uniqueness(),
            ConstraintViolation::Book(c) => c.is_uniqueness(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => c.fmt(f),
            ConstraintViolation::Book(c) => c.fmt(f),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_constraints() {
        assert_eq!(
            ConstraintViolation::new("users_username_unique"),
            Some(ConstraintViolation::User(UserConstraints::UsernameUnique))
        );
        assert_eq!(
            ConstraintViolation::new("books_title_author_unique"),
            Some(ConstraintViolation::Book(BookConstraints::TitleAuthorUnique))
        );
    }

    #[test]
    fn rejects_unknown_constraints() {
        assert_eq!(ConstraintViolation::new("users_unknown"), None);
        assert_eq!(ConstraintViolation::new("accounts_email_unique"), None);
        assert_eq!(ConstraintViolation::new(""), None);
    }

    #[test]
    fn display_round_trips_through_new() {
        let violation = ConstraintViolation::Book(BookConstraints::TitleNotEmpty);
        assert_eq!(violation.to_string(), "books_title_not_empty");
        assert_eq!(violation.table_name(), "books");
        assert!(!violation.is_uniqueness());
        assert_eq!(ConstraintViolation::new(&violation.to_string()), Some(violation));
    }
}
