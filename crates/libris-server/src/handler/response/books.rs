//! Book response types.

use jiff::civil::Date;
use libris_postgres::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A catalogued book.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique book identifier.
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Calendar date of first publication, if known.
    pub publication_date: Option<Date>,
    pub genres: Vec<String>,
}

/// List of books.
pub type Books = Vec<Book>;

impl Book {
    pub fn from_model(book: model::Book) -> Self {
        Self {
            id: book.id,
            publication_date: book.published_on(),
            title: book.title,
            author: book.author,
            genres: book.genres,
        }
    }
}

/// Acknowledges a deletion.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct Deleted {
    /// Always `true`.
    pub success: bool,
}

impl Deleted {
    pub const fn new() -> Self {
        Self { success: true }
    }
}

impl Default for Deleted {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn renders_camel_case_with_plain_date() -> anyhow::Result<()> {
        let row = model::NewBook::new("Dune", "Frank Herbert", vec!["sf".into()], Some(date(1965, 8, 1)))
            .into_book(3);
        let json = serde_json::to_value(Book::from_model(row))?;

        assert_eq!(json["id"], 3);
        assert_eq!(json["publicationDate"], "1965-08-01");
        assert_eq!(json["genres"][0], "sf");
        Ok(())
    }

    #[test]
    fn unknown_date_is_null() -> anyhow::Result<()> {
        let row = model::NewBook::new("Dune", "Frank Herbert", vec![], None).into_book(1);
        let json = serde_json::to_value(Book::from_model(row))?;
        assert!(json["publicationDate"].is_null());
        Ok(())
    }
}
