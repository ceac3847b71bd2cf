//! Constraints, enumerations and other custom types.

mod constraint;
mod user_role;

pub use self::constraint::{BookConstraints, ConstraintViolation, UserConstraints};
pub use self::user_role::UserRole;
