//! User account request types.

use libris_postgres::model::NewUser;
use libris_postgres::types::UserRole;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{Required, has_dotted_domain, is_blank, validation_error};
use crate::handler::Result;
use crate::service::{CredentialHasher, parse_role};

/// Request payload for account registration.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_register_fields", skip_on_field_errors = false))]
pub struct RegisterUser {
    /// Unique login name.
    #[validate(length(max = 64, message = "Username must be at most 64 characters"))]
    pub username: Option<String>,
    /// Plaintext password; only its digest is stored.
    pub password: Option<String>,
    /// Unique contact address.
    #[validate(
        email(message = "Email is invalid"),
        length(max = 128, message = "Email must be at most 128 characters")
    )]
    pub email: Option<String>,
}

fn validate_register_fields(request: &RegisterUser) -> Result<(), ValidationError> {
    let missing = is_blank(request.username.as_deref())
        || is_blank(request.password.as_deref())
        || is_blank(request.email.as_deref());

    if missing {
        return Err(validation_error(
            "missing",
            "Username, password or email is not specified",
        ));
    }

    if !request.email.as_deref().is_some_and(has_dotted_domain) {
        return Err(validation_error("email", "Email is invalid"));
    }

    Ok(())
}

impl RegisterUser {
    /// Converts a validated request into a row, hashing the password.
    pub fn into_model(self, hasher: &CredentialHasher, role: UserRole) -> Result<NewUser> {
        let password = self.password.required("password")?;

        Ok(NewUser {
            username: self.username.required("username")?,
            password_hash: hasher.hash(&password),
            email: self.email.required("email")?,
            role,
        })
    }
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_login_fields", skip_on_field_errors = false))]
pub struct LoginUser {
    /// Login name.
    pub username: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

fn validate_login_fields(request: &LoginUser) -> Result<(), ValidationError> {
    if is_blank(request.username.as_deref()) || is_blank(request.password.as_deref()) {
        return Err(validation_error(
            "missing",
            "Username or password is not specified",
        ));
    }

    Ok(())
}

/// Request payload for changing a user's role.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_role_field", skip_on_field_errors = false))]
pub struct ChangeRole {
    /// Name of the new role: `admin` or `reader`.
    pub role: Option<String>,
}

fn validate_role_field(request: &ChangeRole) -> Result<(), ValidationError> {
    let Some(role) = request.role.as_deref().filter(|r| !r.is_empty()) else {
        return Err(validation_error("missing", "Role is not specified"));
    };

    parse_role(role).map_err(|_| validation_error("unknown_role", "Unknown role"))?;
    Ok(())
}

impl ChangeRole {
    /// Returns the requested role.
    pub fn role(&self) -> Result<UserRole> {
        let role = self.role.as_deref().required("role")?;
        parse_role(role).map_err(|e| {
            crate::handler::ErrorKind::BadRequest
                .with_message("Unknown role")
                .with_context(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Error;

    fn first_message(request: &impl Validate) -> Option<String> {
        let errors = request.validate().err()?;
        Error::from(errors).message().map(str::to_owned)
    }

    fn register(username: &str, password: &str, email: &str) -> RegisterUser {
        RegisterUser {
            username: Some(username.to_owned()),
            password: Some(password.to_owned()),
            email: Some(email.to_owned()),
        }
    }

    #[test]
    fn register_accepts_complete_payload() {
        assert!(register("alice", "pw", "alice@example.com").validate().is_ok());
    }

    #[test]
    fn register_reports_missing_fields_first() {
        let request = RegisterUser {
            username: None,
            ..register("", "pw", "not-an-email")
        };
        assert_eq!(
            first_message(&request).as_deref(),
            Some("Username, password or email is not specified")
        );

        let request = register("alice", "   ", "alice@example.com");
        assert_eq!(
            first_message(&request).as_deref(),
            Some("Username, password or email is not specified")
        );

        let request = register("alice", "", "alice@example.com");
        assert_eq!(
            first_message(&request).as_deref(),
            Some("Username, password or email is not specified")
        );
    }

    #[test]
    fn register_rejects_bad_email() {
        let request = register("alice", "pw", "alice.example.com");
        assert_eq!(first_message(&request).as_deref(), Some("Email is invalid"));

        let request = register("alice", "pw", "invalid.email@ru");
        assert_eq!(first_message(&request).as_deref(), Some("Email is invalid"));
    }

    #[test]
    fn register_limits_username_length() {
        let request = register(&"a".repeat(65), "pw", "alice@example.com");
        assert_eq!(
            first_message(&request).as_deref(),
            Some("Username must be at most 64 characters")
        );
        assert!(register(&"a".repeat(64), "pw", "a@example.com").validate().is_ok());
    }

    #[test]
    fn register_hashes_password() -> anyhow::Result<()> {
        let hasher = CredentialHasher::new();
        let user = register("alice", "pw", "alice@example.com")
            .into_model(&hasher, UserRole::Reader)?;

        assert_eq!(user.password_hash, hasher.hash("pw"));
        assert_ne!(user.password_hash, "pw");
        assert_eq!(user.role, UserRole::Reader);
        Ok(())
    }

    #[test]
    fn login_requires_both_fields() {
        let request = LoginUser {
            username: Some("alice".into()),
            password: None,
        };
        assert_eq!(
            first_message(&request).as_deref(),
            Some("Username or password is not specified")
        );
    }

    #[test]
    fn role_must_be_known() -> anyhow::Result<()> {
        let missing = ChangeRole { role: None };
        assert_eq!(first_message(&missing).as_deref(), Some("Role is not specified"));

        let empty = ChangeRole {
            role: Some(String::new()),
        };
        assert_eq!(first_message(&empty).as_deref(), Some("Role is not specified"));

        let bogus = ChangeRole {
            role: Some("bogus".into()),
        };
        assert_eq!(first_message(&bogus).as_deref(), Some("Unknown role"));

        let admin = ChangeRole {
            role: Some("admin".into()),
        };
        assert!(admin.validate().is_ok());
        assert_eq!(admin.role()?, UserRole::Admin);
        Ok(())
    }
}
