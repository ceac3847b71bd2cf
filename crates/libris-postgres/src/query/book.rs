//! Book repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Book, NewBook, UpdateBook};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for book database operations.
pub trait BookRepository {
    /// Inserts a new book and returns the stored row.
    ///
    /// Fails with a unique violation on `books_title_author_unique` when
    /// the same title and author pair already exists.
    fn create_book(&mut self, new_book: NewBook) -> impl Future<Output = PgResult<Book>> + Send;

    /// Lists every book ordered by identifier.
    fn list_books(&mut self) -> impl Future<Output = PgResult<Vec<Book>>> + Send;

    /// Finds a book by identifier.
    fn find_book_by_id(
        &mut self,
        book_id: i32,
    ) -> impl Future<Output = PgResult<Option<Book>>> + Send;

    /// Finds all books with the exact title.
    fn find_books_by_title(
        &mut self,
        title: &str,
    ) -> impl Future<Output = PgResult<Vec<Book>>> + Send;

    /// Replaces a book's fields. Returns `None` if the book does not exist.
    fn update_book(
        &mut self,
        book_id: i32,
        updates: UpdateBook,
    ) -> impl Future<Output = PgResult<Option<Book>>> + Send;

    /// Deletes a book. Returns whether a row was removed.
    fn delete_book(&mut self, book_id: i32) -> impl Future<Output = PgResult<bool>> + Send;
}

impl BookRepository for PgConnection {
    async fn create_book(&mut self, new_book: NewBook) -> PgResult<Book> {
        use schema::books;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            title = %new_book.title,
            author = %new_book.author,
            "inserting book"
        );

        diesel::insert_into(books::table)
            .values(&new_book)
            .returning(Book::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_books(&mut self) -> PgResult<Vec<Book>> {
        use schema::books::{self, dsl};

        books::table
            .order(dsl::id.asc())
            .select(Book::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_book_by_id(&mut self, book_id: i32) -> PgResult<Option<Book>> {
        use schema::books::{self, dsl};

        books::table
            .filter(dsl::id.eq(book_id))
            .select(Book::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_books_by_title(&mut self, title: &str) -> PgResult<Vec<Book>> {
        use schema::books::{self, dsl};

        books::table
            .filter(dsl::title.eq(title))
            .order(dsl::id.asc())
            .select(Book::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_book(&mut self, book_id: i32, updates: UpdateBook) -> PgResult<Option<Book>> {
        use schema::books::{self, dsl};

        diesel::update(books::table.filter(dsl::id.eq(book_id)))
            .set(&updates)
            .returning(Book::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_book(&mut self, book_id: i32) -> PgResult<bool> {
        use schema::books::{self, dsl};

        let deleted = diesel::delete(books::table.filter(dsl::id.eq(book_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
