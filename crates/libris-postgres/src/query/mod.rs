//! Repository traits implemented for [`PgConnection`].
//!
//! [`PgConnection`]: crate::PgConnection

mod book;
mod user;

pub use self::book::BookRepository;
pub use self::user::UserRepository;
