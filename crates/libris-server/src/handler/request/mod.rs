//! Request types for HTTP handlers.

mod books;
mod paths;
mod users;
mod validations;

pub use books::*;
pub use paths::*;
pub use users::*;
pub use validations::*;
