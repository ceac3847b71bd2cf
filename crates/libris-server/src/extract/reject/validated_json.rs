//! JSON extractor that runs `validator` rules after deserialization.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Key under which struct-level (`schema`) validation errors are reported.
const SCHEMA_ERRORS_KEY: &str = "__all__";

/// JSON extractor that also validates the payload.
///
/// Rejects with a single 400 whose message is the first failing rule:
/// struct-level rules first, then field rules by field name.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("Field '{}' failed validation: {}", field, error.code),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let mut fields: Vec<_> = field_errors
            .iter()
            .filter(|(field, _)| field.as_ref() != SCHEMA_ERRORS_KEY)
            .collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let schema = field_errors
            .get(SCHEMA_ERRORS_KEY)
            .map(|errors| (SCHEMA_ERRORS_KEY, *errors));
        let first = schema
            .into_iter()
            .chain(fields.into_iter().map(|(field, errors)| (field.as_ref(), *errors)))
            .find_map(|(field, errors)| errors.first().map(|error| describe(field, error)));

        tracing::debug!(
            errors = ?field_errors,
            "request validation failed"
        );

        ErrorKind::BadRequest.with_message(first.unwrap_or_else(|| "Validation failed".to_owned()))
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    fn failing(code: &'static str, message: &'static str) -> ValidationError {
        ValidationError::new(code).with_message(Cow::Borrowed(message))
    }

    #[test]
    fn schema_errors_win() {
        let mut errors = ValidationErrors::new();
        errors.add("email", failing("email", "Email is invalid"));
        errors.add(SCHEMA_ERRORS_KEY, failing("missing", "Username, password or email is not specified"));

        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(
            error.message(),
            Some("Username, password or email is not specified")
        );
    }

    #[test]
    fn fields_are_reported_in_name_order() {
        let mut errors = ValidationErrors::new();
        errors.add("username", failing("length", "Username is too long"));
        errors.add("email", failing("email", "Email is invalid"));

        assert_eq!(Error::from(errors).message(), Some("Email is invalid"));
    }

    #[test]
    fn missing_message_falls_back_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("title", ValidationError::new("length"));

        assert_eq!(
            Error::from(errors).message(),
            Some("Field 'title' failed validation: length")
        );
    }
}
