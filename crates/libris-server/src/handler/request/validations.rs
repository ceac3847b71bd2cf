//! Request validation utilities.

use validator::ValidationError;

/// Builds a [`ValidationError`] carrying a client-facing message.
pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

/// Returns `true` when a required text field is absent, empty or only
/// whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

/// Returns `true` when the part after the last `@` has at least two
/// non-empty dot-separated labels.
pub fn has_dotted_domain(email: &str) -> bool {
    email.rsplit_once('@').is_some_and(|(_, domain)| {
        domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
    })
}

/// Extension for taking a required field out of a validated request.
pub trait Required<T> {
    /// Returns the value, or a 400 if validation let an absent value through.
    fn required(self, field: &'static str) -> crate::handler::Result<T>;
}

impl<T> Required<T> for Option<T> {
    fn required(self, field: &'static str) -> crate::handler::Result<T> {
        self.ok_or_else(|| {
            crate::handler::ErrorKind::BadRequest
                .with_message(format!("Field '{field}' is not specified"))
        })
    }
}
