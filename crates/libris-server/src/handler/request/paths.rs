//! Path parameter types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::handler::{ErrorKind, Result};

/// Path parameters for operations on a single user or book.
///
/// The identifier is taken as text so that a malformed value is answered
/// with the same 400 as a non-positive one.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecordPathParams {
    /// Positive integer identifier of the record.
    pub id: String,
}

impl RecordPathParams {
    /// Parses the identifier, rejecting anything but a positive integer.
    pub fn id(&self) -> Result<i32> {
        match self.id.trim().parse::<i32>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(ErrorKind::BadRequest
                .with_message("Wrong id")
                .with_context(format!("id: {:?}", self.id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(id: &str) -> RecordPathParams {
        RecordPathParams { id: id.to_owned() }
    }

    #[test]
    fn positive_ids_parse() -> anyhow::Result<()> {
        assert_eq!(params("1").id()?, 1);
        assert_eq!(params("42").id()?, 42);
        Ok(())
    }

    #[test]
    fn other_ids_are_rejected() {
        for id in ["0", "-3", "abc", "1.5", "", "99999999999"] {
            let err = params(id).id().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadRequest, "{id:?}");
            assert_eq!(err.message(), Some("Wrong id"));
        }
    }
}
