//! Role rights expressed as a small bitmask.
//!
//! Every role maps to a fixed combination of four disjoint flags. Mutating
//! HTTP methods map to one [`Action`] each; authorization is a single AND
//! against the caller's mask.

use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

use axum::http::Method;
use libris_postgres::types::UserRole;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Operation implied by a request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// Returns the flag this action requires.
    #[must_use]
    pub const fn bit(self) -> Rights {
        match self {
            Self::Create => Rights::CREATE,
            Self::Read => Rights::READ,
            Self::Update => Rights::UPDATE,
            Self::Delete => Rights::DELETE,
        }
    }

    /// Maps a request method onto the action it performs.
    ///
    /// Returns `None` for methods that need no rights check (`GET`, `HEAD`, ...).
    #[must_use]
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::POST => Some(Self::Create),
            Method::PUT => Some(Self::Update),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Combination of [`Action`] flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rights(u16);

impl Rights {
    pub const CREATE: Self = Self(0x1000);
    pub const DELETE: Self = Self(0x0001);
    pub const NONE: Self = Self(0);
    pub const READ: Self = Self(0x0100);
    pub const UPDATE: Self = Self(0x0010);

    /// Returns the raw mask.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if any flag of `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the rights granted to a role.
    #[must_use]
    pub const fn of(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self(Self::CREATE.0 | Self::READ.0 | Self::UPDATE.0 | Self::DELETE.0),
            UserRole::Reader => Self::READ,
        }
    }

    /// Returns the actions whose flags are set.
    pub fn actions(self) -> impl Iterator<Item = Action> {
        Action::iter().filter(move |action| self.contains(action.bit()))
    }
}

impl BitOr for Rights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Rights {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for Rights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// A role name that is not part of the rights table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Parses a role name supplied as user input.
pub fn parse_role(name: &str) -> Result<UserRole, UnknownRole> {
    UserRole::from_str(name).map_err(|_| UnknownRole(name.to_owned()))
}

/// Returns the rights of a role given by name.
pub fn rights_of(name: &str) -> Result<Rights, UnknownRole> {
    parse_role(name).map(Rights::of)
}

/// Rights lookups on [`UserRole`].
pub trait RoleRightsExt {
    /// Returns the rights granted to this role.
    fn rights(self) -> Rights;

    /// Returns `true` if this role may perform `action`.
    fn has_right(self, action: Action) -> bool;
}

impl RoleRightsExt for UserRole {
    #[inline]
    fn rights(self) -> Rights {
        Rights::of(self)
    }

    #[inline]
    fn has_right(self, action: Action) -> bool {
        Rights::of(self).contains(action.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_disjoint() {
        let all: Vec<_> = Action::iter().map(Action::bit).collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_eq!((*a & *b), Rights::NONE);
            }
        }
    }

    #[test]
    fn admin_has_every_right() {
        let rights = Rights::CREATE | Rights::READ | Rights::UPDATE | Rights::DELETE;
        assert_eq!(Rights::of(UserRole::Admin), rights);
        assert_eq!(Rights::of(UserRole::Admin).bits(), 0x1111);
        assert!(Action::iter().all(|a| UserRole::Admin.has_right(a)));
    }

    #[test]
    fn reader_can_only_read() {
        assert_eq!(Rights::of(UserRole::Reader), Rights::READ);
        assert!(UserRole::Reader.has_right(Action::Read));
        assert!(!UserRole::Reader.has_right(Action::Create));
        assert!(!UserRole::Reader.has_right(Action::Update));
        assert!(!UserRole::Reader.has_right(Action::Delete));
        assert_eq!(UserRole::Reader.rights().actions().collect::<Vec<_>>(), [Action::Read]);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(rights_of("admin"), Ok(Rights::of(UserRole::Admin)));
        assert_eq!(rights_of("bogus"), Err(UnknownRole("bogus".into())));
        assert!(parse_role("").is_err());
        assert!(parse_role("Admin").is_err());
    }

    #[test]
    fn methods_map_to_actions() {
        assert_eq!(Action::from_method(&Method::POST), Some(Action::Create));
        assert_eq!(Action::from_method(&Method::PUT), Some(Action::Update));
        assert_eq!(Action::from_method(&Method::DELETE), Some(Action::Delete));
        assert_eq!(Action::from_method(&Method::GET), None);
        assert_eq!(Action::from_method(&Method::PATCH), None);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Action::Create.to_string(), "CREATE");
        assert_eq!(Rights::READ.to_string(), "0x0100");
    }
}
