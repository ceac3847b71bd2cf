use diesel::prelude::*;
use jiff::civil::Date;

use crate::schema::books;

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Book {
    /// Unique book identifier.
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Genre labels in insertion order.
    pub genres: Vec<String>,
    pub publication_date: Option<jiff_diesel::Date>,
}

/// Data for creating a new book.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genres: Vec<String>,
    pub publication_date: Option<jiff_diesel::Date>,
}

/// Data for replacing a book's fields.
///
/// `publication_date` is written even when `None`, which clears it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct UpdateBook {
    pub title: String,
    pub author: String,
    pub genres: Vec<String>,
    pub publication_date: Option<jiff_diesel::Date>,
}

impl Book {
    /// Returns the publication date as a civil date.
    #[inline]
    pub fn published_on(&self) -> Option<Date> {
        self.publication_date.map(Into::into)
    }
}

impl NewBook {
    /// Creates a new book record.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genres: Vec<String>,
        publication_date: Option<Date>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genres,
            publication_date: publication_date.map(Into::into),
        }
    }

    /// Builds the stored row once an identifier has been assigned.
    pub fn into_book(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genres: self.genres,
            publication_date: self.publication_date,
        }
    }
}

impl UpdateBook {
    /// Applies the changeset to an in-memory row.
    pub fn apply_to(self, book: &mut Book) {
        book.title = self.title;
        book.author = self.author;
        book.genres = self.genres;
        book.publication_date = self.publication_date;
    }
}

impl From<NewBook> for UpdateBook {
    fn from(book: NewBook) -> Self {
        Self {
            title: book.title,
            author: book.author,
            genres: book.genres,
            publication_date: book.publication_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn publication_date_converts_back_to_civil() {
        let book = NewBook::new(
            "Dune",
            "Frank Herbert",
            vec!["sci-fi".to_owned()],
            Some(date(1965, 8, 1)),
        )
        .into_book(3);

        assert_eq!(book.id, 3);
        assert_eq!(book.published_on(), Some(date(1965, 8, 1)));
    }

    #[test]
    fn update_replaces_every_field() {
        let mut book = NewBook::new("Dune", "Herbert", vec![], Some(date(1965, 8, 1))).into_book(1);
        let update: UpdateBook = NewBook::new("Dune Messiah", "Herbert", vec!["sf".into()], None).into();
        update.apply_to(&mut book);

        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.genres, vec!["sf".to_owned()]);
        assert_eq!(book.published_on(), None);
    }
}
