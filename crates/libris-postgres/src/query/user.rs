//! User repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{NewUser, UpdateUser, User};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for user database operations.
pub trait UserRepository {
    /// Inserts a new user and returns the stored row.
    ///
    /// Fails with a unique violation on `users_username_unique` or
    /// `users_email_unique` for duplicates.
    fn create_user(&mut self, new_user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Finds a user by identifier.
    fn find_user_by_id(
        &mut self,
        user_id: i32,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by login name.
    fn find_user_by_username(
        &mut self,
        username: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by email address.
    fn find_user_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Applies a partial update. Returns `None` if the user does not exist.
    fn update_user(
        &mut self,
        user_id: i32,
        updates: UpdateUser,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user(&mut self, new_user: NewUser) -> PgResult<User> {
        use schema::users;

        tracing::debug!(target: TRACING_TARGET_QUERY, username = %new_user.username, "inserting user");

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_user_by_id(&mut self, user_id: i32) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_by_username(&mut self, username: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::username.eq(username))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_by_email(&mut self, email: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::email.eq(email))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn update_user(&mut self, user_id: i32, updates: UpdateUser) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set(&updates)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }
}
