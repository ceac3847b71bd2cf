//! Service error to HTTP error conversion.

use super::http_error::{Error as HttpError, ErrorKind};
use crate::{Error as ServiceError, ErrorKind as ServiceErrorKind};

const TRACING_TARGET: &str = "libris_server::handler::service";

impl From<ServiceError> for HttpError<'static> {
    fn from(error: ServiceError) -> Self {
        match error.kind() {
            ServiceErrorKind::External => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "external service failed"
                );
            }
            ServiceErrorKind::Config | ServiceErrorKind::Auth | ServiceErrorKind::Internal => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind(),
                    "service operation failed"
                );
            }
        }

        ErrorKind::InternalServerError.with_context(error.message().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_are_internal() {
        let error = HttpError::from(ServiceError::auth("token signing failed"));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.context(), Some("token signing failed"));
        assert_eq!(error.message(), None);
    }
}
