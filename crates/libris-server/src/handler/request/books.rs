//! Book request types.

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use libris_postgres::model::{NewBook, UpdateBook};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{Required, is_blank, validation_error};
use crate::handler::Result;

/// Parses a publication date given as a calendar date or an RFC 3339
/// timestamp. Timestamps are reduced to their UTC date.
pub fn parse_publication_date(value: &str) -> Option<Date> {
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Some(timestamp.to_zoned(TimeZone::UTC).date());
    }

    value.parse::<Date>().ok()
}

/// Request payload for creating or replacing a book.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_book_fields", skip_on_field_errors = false))]
pub struct BookPayload {
    /// Book title.
    #[validate(length(max = 128, message = "Title must be at most 128 characters"))]
    pub title: Option<String>,
    /// Book author.
    #[validate(length(max = 128, message = "Author must be at most 128 characters"))]
    pub author: Option<String>,
    /// Genres, possibly empty.
    pub genres: Option<Vec<String>>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
}

fn validate_book_fields(request: &BookPayload) -> Result<(), ValidationError> {
    let missing = is_blank(request.title.as_deref())
        || is_blank(request.author.as_deref())
        || request.genres.is_none();

    if missing {
        return Err(validation_error(
            "missing",
            "Title, author or genres is not specified",
        ));
    }

    if let Some(value) = request.publication_date.as_deref().filter(|v| !v.is_empty())
        && parse_publication_date(value).is_none()
    {
        return Err(validation_error(
            "publication_date",
            "Invalid publicationDate value",
        ));
    }

    Ok(())
}

impl BookPayload {
    /// Converts a validated payload into a new row.
    pub fn into_model(self) -> Result<NewBook> {
        let publication_date = self
            .publication_date
            .as_deref()
            .filter(|v| !v.is_empty())
            .and_then(parse_publication_date);

        Ok(NewBook::new(
            self.title.required("title")?,
            self.author.required("author")?,
            self.genres.required("genres")?,
            publication_date,
        ))
    }

    /// Converts a validated payload into a full replacement.
    pub fn into_update(self) -> Result<UpdateBook> {
        self.into_model().map(UpdateBook::from)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::handler::Error;

    fn payload() -> BookPayload {
        BookPayload {
            title: Some("Dune".into()),
            author: Some("Frank Herbert".into()),
            genres: Some(vec!["science fiction".into()]),
            publication_date: None,
        }
    }

    fn first_message(request: &BookPayload) -> Option<String> {
        let errors = request.validate().err()?;
        Error::from(errors).message().map(str::to_owned)
    }

    #[test]
    fn dates_and_timestamps_parse() {
        assert_eq!(parse_publication_date("1965-08-01"), Some(date(1965, 8, 1)));
        assert_eq!(
            parse_publication_date("1965-08-01T23:30:00-02:00"),
            Some(date(1965, 8, 2))
        );
        assert_eq!(parse_publication_date("yesterday"), None);
        assert_eq!(parse_publication_date("1965-13-01"), None);
    }

    #[test]
    fn complete_payload_is_valid() {
        assert!(payload().validate().is_ok());

        let no_genres = BookPayload {
            genres: Some(Vec::new()),
            ..payload()
        };
        assert!(no_genres.validate().is_ok());
    }

    #[test]
    fn missing_fields_are_reported() {
        for request in [
            BookPayload { title: None, ..payload() },
            BookPayload { author: Some(String::new()), ..payload() },
            BookPayload { title: Some("  ".into()), ..payload() },
            BookPayload { genres: None, ..payload() },
        ] {
            assert_eq!(
                first_message(&request).as_deref(),
                Some("Title, author or genres is not specified")
            );
        }
    }

    #[test]
    fn bad_date_is_reported() {
        let request = BookPayload {
            publication_date: Some("not a date".into()),
            ..payload()
        };
        assert_eq!(
            first_message(&request).as_deref(),
            Some("Invalid publicationDate value")
        );
    }

    #[test]
    fn empty_date_means_unknown() -> anyhow::Result<()> {
        let request = BookPayload {
            publication_date: Some(String::new()),
            ..payload()
        };
        assert!(request.validate().is_ok());
        assert!(request.into_model()?.publication_date.is_none());
        Ok(())
    }

    #[test]
    fn long_title_is_rejected() {
        let request = BookPayload {
            title: Some("x".repeat(129)),
            ..payload()
        };
        assert_eq!(
            first_message(&request).as_deref(),
            Some("Title must be at most 128 characters")
        );
    }
}
