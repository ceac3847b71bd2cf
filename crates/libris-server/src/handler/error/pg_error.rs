//! Database error to HTTP error conversion.
//!
//! Constraint violations are recognised by name and become client errors;
//! everything else is logged and reported as a 500.

use libris_postgres::PgError;
use libris_postgres::types::{BookConstraints, ConstraintViolation, UserConstraints};

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "libris_server::postgres_constraints";

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        let error = match c {
            UserConstraints::UsernameUnique => {
                ErrorKind::Conflict.with_message("User with the specified name already exists")
            }
            UserConstraints::EmailUnique => ErrorKind::Conflict
                .with_message("User with the specified email address already exists"),
            UserConstraints::UsernameNotEmpty => {
                ErrorKind::BadRequest.with_message("Username cannot be empty")
            }
            UserConstraints::PasswordHashLength => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("users")
    }
}

impl From<BookConstraints> for Error<'static> {
    fn from(c: BookConstraints) -> Self {
        let error = match c {
            BookConstraints::TitleAuthorUnique => ErrorKind::Conflict
                .with_message("Book with the specified title and author already exists"),
            BookConstraints::TitleNotEmpty => {
                ErrorKind::BadRequest.with_message("Title cannot be empty")
            }
            BookConstraints::AuthorNotEmpty => {
                ErrorKind::BadRequest.with_message("Author cannot be empty")
            }
        };

        error.with_resource("books")
    }
}

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::User(c) => c.into(),
            ConstraintViolation::Book(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        if let Some(constraint) = error.constraint_violation() {
            tracing::warn!(
                target: TRACING_TARGET,
                constraint = %constraint,
                "query rejected by constraint"
            );
            return constraint.into();
        }

        match &error {
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
            }
            other => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %other,
                    "database error"
                );
            }
        }

        ErrorKind::InternalServerError.into_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violations_are_conflicts() {
        let error = Error::from(UserConstraints::UsernameUnique);
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(
            error.message(),
            Some("User with the specified name already exists")
        );

        let error = Error::from(UserConstraints::EmailUnique);
        assert_eq!(
            error.message(),
            Some("User with the specified email address already exists")
        );

        let error = Error::from(ConstraintViolation::Book(BookConstraints::TitleAuthorUnique));
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("books"));
    }

    #[test]
    fn other_constraints_are_bad_requests() {
        let error = Error::from(BookConstraints::TitleNotEmpty);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn plain_database_errors_are_internal() {
        let error = Error::from(PgError::Unexpected("boom".into()));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
    }
}
