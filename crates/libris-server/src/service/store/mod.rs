//! Persistence seam between handlers and the database.
//!
//! Handlers talk to [`ServiceStore`], which wraps any [`Store`]. The
//! Postgres backend is used in production; the in-memory backend serves
//! tests and `--in-memory` local runs with the same uniqueness rules.

mod memory;
mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Deref;
use libris_postgres::model::{Book, NewBook, NewUser, UpdateBook, User};
use libris_postgres::types::UserRole;

pub use self::memory::MemoryStore;
pub use self::postgres::PgStore;
use crate::handler::Result;

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Duplicate usernames or emails are conflicts.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Replaces the role of a user. Returns `None` for an unknown user.
    async fn update_user_role(&self, user_id: i32, role: UserRole) -> Result<Option<User>>;
}

/// Book catalog persistence.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Inserts a book. A duplicate title and author pair is a conflict.
    async fn create_book(&self, new_book: NewBook) -> Result<Book>;

    /// Lists every book ordered by id.
    async fn list_books(&self) -> Result<Vec<Book>>;

    async fn find_book_by_id(&self, book_id: i32) -> Result<Option<Book>>;

    async fn find_books_by_title(&self, title: &str) -> Result<Vec<Book>>;

    /// Replaces every field of a book. Returns `None` for an unknown book.
    async fn update_book(&self, book_id: i32, updates: UpdateBook) -> Result<Option<Book>>;

    /// Returns whether a book was removed.
    async fn delete_book(&self, book_id: i32) -> Result<bool>;
}

/// Everything the handlers need from a backend.
pub trait Store: UserStore + BookStore {}

impl<T> Store for T where T: UserStore + BookStore {}

/// Shared handle to the configured store backend.
#[derive(Clone, Deref)]
pub struct ServiceStore(Arc<dyn Store>);

impl ServiceStore {
    /// Wraps a backend.
    pub fn new(store: impl Store + 'static) -> Self {
        Self(Arc::new(store))
    }
}

impl fmt::Debug for ServiceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceStore").finish_non_exhaustive()
    }
}
