use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

/// Body of every failed request.
///
/// `name` is a stable machine-readable identifier, `message` is the text a
/// client shows to its user.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// User-facing error message
    pub message: Cow<'a, str>,
    /// The resource that the error relates to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,

    /// Internal context for debugging, never sent to the client
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self =
        Self::new("conflict", "Resource state conflict", StatusCode::CONFLICT);
    pub const FORBIDDEN: Self = Self::new("forbidden", "Access denied", StatusCode::FORBIDDEN);
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found", StatusCode::NOT_FOUND);
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "Payload too large",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const REQUEST_TIMEOUT: Self = Self::new(
        "request_timeout",
        "Request timed out",
        StatusCode::REQUEST_TIMEOUT,
    );
    pub const UNAUTHORIZED: Self =
        Self::new("unauthorized", "not logged in", StatusCode::UNAUTHORIZED);
    pub const UNSUPPORTED_MEDIA_TYPE: Self = Self::new(
        "unsupported_media_type",
        "Unsupported media type",
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the resource. An existing resource is joined with a separator.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                name = %self.name,
                message = %self.message,
                context = ?self.context,
                "HTTP error response"
            );
        } else {
            tracing::debug!(
                status = %self.status,
                name = %self.name,
                message = %self.message,
                resource = ?self.resource,
                context = ?self.context,
                "HTTP error response"
            );
        }

        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_replaced() {
        let response = ErrorResponse::BAD_REQUEST
            .with_message("Invalid format")
            .with_message("Wrong id");

        assert_eq!(&response.message, "Wrong id");
    }

    #[test]
    fn resource_is_merged() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("users")
            .with_resource("role");

        assert_eq!(response.resource.as_deref(), Some("users/role"));
    }

    #[test]
    fn context_is_merged() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("pool exhausted")
            .with_context("wait timeout");

        assert_eq!(
            response.context.as_deref(),
            Some("pool exhausted; wait timeout")
        );
    }

    #[test]
    fn serialization_skips_internal_fields() -> anyhow::Result<()> {
        let response = ErrorResponse::FORBIDDEN
            .with_resource("books")
            .with_context("reader attempted CREATE");

        let json = serde_json::to_value(&response)?;

        assert_eq!(json["name"], "forbidden");
        assert_eq!(json["message"], "Access denied");
        assert_eq!(json["resource"], "books");
        assert!(json.get("context").is_none());
        assert!(json.get("status").is_none());
        Ok(())
    }
}
