use async_trait::async_trait;
use libris_postgres::PgClient;
use libris_postgres::model::{Book, NewBook, NewUser, UpdateBook, UpdateUser, User};
use libris_postgres::query::{BookRepository, UserRepository};
use libris_postgres::types::UserRole;

use super::{BookStore, UserStore};
use crate::handler::Result;

/// Store backed by the Postgres connection pool.
///
/// Every call checks out one pooled connection for its duration.
#[derive(Debug, Clone)]
pub struct PgStore {
    client: PgClient,
}

impl PgStore {
    /// Creates a store over an already migrated database.
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.create_user(new_user).await?)
    }

    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<User>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.find_user_by_id(user_id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.find_user_by_username(username).await?)
    }

    async fn update_user_role(&self, user_id: i32, role: UserRole) -> Result<Option<User>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.update_user(user_id, UpdateUser::role(role)).await?)
    }
}

#[async_trait]
impl BookStore for PgStore {
    async fn create_book(&self, new_book: NewBook) -> Result<Book> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.create_book(new_book).await?)
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.list_books().await?)
    }

    async fn find_book_by_id(&self, book_id: i32) -> Result<Option<Book>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.find_book_by_id(book_id).await?)
    }

    async fn find_books_by_title(&self, title: &str) -> Result<Vec<Book>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.find_books_by_title(title).await?)
    }

    async fn update_book(&self, book_id: i32, updates: UpdateBook) -> Result<Option<Book>> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.update_book(book_id, updates).await?)
    }

    async fn delete_book(&self, book_id: i32) -> Result<bool> {
        let mut conn = self.client.get_connection().await?;
        Ok(conn.delete_book(book_id).await?)
    }
}
