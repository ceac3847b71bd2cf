//! User role enumeration.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Permission profile of a user account.
///
/// Corresponds to the `user_role` PostgreSQL enum. The string forms
/// (`admin`, `reader`) are shared by the database, the JSON API and the
/// identity token.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, DbEnum, AsRefStr, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
pub enum UserRole {
    /// Full rights over every resource.
    #[db_rename = "admin"]
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,

    /// Read-only access.
    #[db_rename = "reader"]
    #[serde(rename = "reader")]
    #[strum(serialize = "reader")]
    #[default]
    Reader,
}

impl UserRole {
    /// Returns whether this role is the administrative one.
    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn string_forms_round_trip() {
        for role in UserRole::iter() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_names_do_not_parse() {
        assert!("bogus".parse::<UserRole>().is_err());
        assert!("Admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn default_role_is_reader() {
        assert_eq!(UserRole::default(), UserRole::Reader);
        assert!(!UserRole::Reader.is_admin());
        assert!(UserRole::Admin.is_admin());
    }
}
