//! Response types for HTTP handlers.

mod books;
mod errors;
mod monitors;
mod users;

pub use books::*;
pub use errors::*;
pub use monitors::*;
pub use users::*;
