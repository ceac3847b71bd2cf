//! Database models for every table.
//!
//! Each table has a queryable row type, an insertable `New*` type and,
//! where rows can change, an `Update*` changeset.

mod book;
mod user;

pub use self::book::{Book, NewBook, UpdateBook};
pub use self::user::{NewUser, UpdateUser, User};
