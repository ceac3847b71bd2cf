use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use libris_postgres::model::{Book, NewBook, NewUser, UpdateBook, UpdateUser, User};
use libris_postgres::types::{BookConstraints, UserConstraints, UserRole};
use tokio::sync::RwLock;

use super::{BookStore, UserStore};
use crate::TRACING_TARGET_STORE;
use crate::handler::{Error, Result};

/// Process-local store with the same uniqueness rules as the database.
///
/// Identifiers start at 1 and are never reused, like `SERIAL` columns.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    books: BTreeMap<i32, Book>,
    last_user_id: i32,
    last_book_id: i32,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user account. Returns whether it existed.
    pub async fn remove_user(&self, user_id: i32) -> bool {
        self.inner.write().await.users.remove(&user_id).is_some()
    }
}

impl Tables {
    fn check_user_unique(&self, username: &str, email: &str) -> Result<()> {
        for user in self.users.values() {
            if user.username == username {
                return Err(Error::from(UserConstraints::UsernameUnique));
            }
            if user.email == email {
                return Err(Error::from(UserConstraints::EmailUnique));
            }
        }
        Ok(())
    }

    fn check_book_unique(&self, title: &str, author: &str, except: Option<i32>) -> Result<()> {
        let duplicate = self
            .books
            .values()
            .filter(|book| Some(book.id) != except)
            .any(|book| book.title == title && book.author == author);

        if duplicate {
            return Err(Error::from(BookConstraints::TitleAuthorUnique));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut tables = self.inner.write().await;
        tables.check_user_unique(&new_user.username, &new_user.email)?;

        tables.last_user_id += 1;
        let user = new_user.into_user(tables.last_user_id);
        tables.users.insert(user.id, user.clone());

        tracing::debug!(target: TRACING_TARGET_STORE, user_id = user.id, "user stored in memory");
        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.inner.read().await;
        let user = tables.users.values().find(|u| u.username == username);
        Ok(user.cloned())
    }

    async fn update_user_role(&self, user_id: i32, role: UserRole) -> Result<Option<User>> {
        let mut tables = self.inner.write().await;
        let Some(user) = tables.users.get_mut(&user_id) else {
            return Ok(None);
        };

        UpdateUser::role(role).apply_to(user);
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn create_book(&self, new_book: NewBook) -> Result<Book> {
        let mut tables = self.inner.write().await;
        tables.check_book_unique(&new_book.title, &new_book.author, None)?;

        tables.last_book_id += 1;
        let book = new_book.into_book(tables.last_book_id);
        tables.books.insert(book.id, book.clone());

        tracing::debug!(target: TRACING_TARGET_STORE, book_id = book.id, "book stored in memory");
        Ok(book)
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        Ok(self.inner.read().await.books.values().cloned().collect())
    }

    async fn find_book_by_id(&self, book_id: i32) -> Result<Option<Book>> {
        Ok(self.inner.read().await.books.get(&book_id).cloned())
    }

    async fn find_books_by_title(&self, title: &str) -> Result<Vec<Book>> {
        let tables = self.inner.read().await;
        let books = tables.books.values().filter(|b| b.title == title);
        Ok(books.cloned().collect())
    }

    async fn update_book(&self, book_id: i32, updates: UpdateBook) -> Result<Option<Book>> {
        let mut tables = self.inner.write().await;
        if !tables.books.contains_key(&book_id) {
            return Ok(None);
        }

        tables.check_book_unique(&updates.title, &updates.author, Some(book_id))?;

        let Some(book) = tables.books.get_mut(&book_id) else {
            return Ok(None);
        };
        updates.apply_to(book);
        Ok(Some(book.clone()))
    }

    async fn delete_book(&self, book_id: i32) -> Result<bool> {
        Ok(self.inner.write().await.books.remove(&book_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ErrorKind;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_owned(),
            password_hash: "0".repeat(64),
            email: email.to_owned(),
            role: UserRole::Reader,
        }
    }

    #[tokio::test]
    async fn users_get_sequential_ids() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let alice = store.create_user(new_user("alice", "a@example.com")).await?;
        let bob = store.create_user(new_user("bob", "b@example.com")).await?;

        assert_eq!((alice.id, bob.id), (1, 2));
        assert_eq!(store.find_user_by_username("bob").await?, Some(bob));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_users_conflict() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.create_user(new_user("alice", "a@example.com")).await?;

        let err = store
            .create_user(new_user("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err.message(),
            Some("User with the specified name already exists")
        );

        let err = store
            .create_user(new_user("carol", "a@example.com"))
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            Some("User with the specified email address already exists")
        );
        Ok(())
    }

    #[tokio::test]
    async fn role_update_and_removal() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("alice", "a@example.com")).await?;

        let updated = store.update_user_role(user.id, UserRole::Admin).await?;
        assert_eq!(updated.map(|u| u.role), Some(UserRole::Admin));
        assert!(store.update_user_role(99, UserRole::Admin).await?.is_none());

        assert!(store.remove_user(user.id).await);
        assert!(store.find_user_by_id(user.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn book_lifecycle() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let dune = store
            .create_book(NewBook::new("Dune", "Herbert", vec!["sf".into()], None))
            .await?;
        store
            .create_book(NewBook::new("Dune", "Lynch", vec![], None))
            .await?;

        assert_eq!(store.find_books_by_title("Dune").await?.len(), 2);

        let err = store
            .create_book(NewBook::new("Dune", "Herbert", vec![], None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let updates = UpdateBook::from(NewBook::new("Dune Messiah", "Herbert", vec![], None));
        let updated = store.update_book(dune.id, updates).await?;
        assert_eq!(updated.map(|b| b.title), Some("Dune Messiah".to_owned()));

        assert!(store.delete_book(dune.id).await?);
        assert!(!store.delete_book(dune.id).await?);
        assert_eq!(store.list_books().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_cannot_collide_with_another_book() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store
            .create_book(NewBook::new("Emma", "Austen", vec![], None))
            .await?;
        let other = store
            .create_book(NewBook::new("Persuasion", "Austen", vec![], None))
            .await?;

        let updates = UpdateBook::from(NewBook::new("Emma", "Austen", vec![], None));
        let err = store.update_book(other.id, updates).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let same = UpdateBook::from(NewBook::new("Persuasion", "Austen", vec!["novel".into()], None));
        assert!(store.update_book(other.id, same).await?.is_some());
        Ok(())
    }
}
