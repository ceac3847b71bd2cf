use diesel::prelude::*;

use crate::schema::users;
use crate::types::UserRole;

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: i32,
    /// Login name, unique across users.
    pub username: String,
    /// Hex-encoded credential digest.
    pub password_hash: String,
    /// Contact email, unique across users.
    pub email: String,
    /// Current role; authorization decisions read it from here.
    pub role: UserRole,
}

/// Data for creating a new user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: UserRole,
}

/// Data for updating a user.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUser {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl UpdateUser {
    /// Changeset that only replaces the role.
    pub fn role(role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    /// Applies the changeset to an in-memory row.
    pub fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}

impl NewUser {
    /// Builds the stored row once an identifier has been assigned.
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            email: self.email,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            username: "ada".to_owned(),
            password_hash: "a".repeat(64),
            email: "ada@example.com".to_owned(),
            role: UserRole::Reader,
        }
    }

    #[test]
    fn role_changeset_only_touches_role() {
        let mut user = new_user().into_user(7);
        UpdateUser::role(UserRole::Admin).apply_to(&mut user);

        assert_eq!(user.id, 7);
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.username, "ada");
        assert_eq!(user.email, "ada@example.com");
    }
}
