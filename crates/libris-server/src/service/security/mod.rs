//! Credential hashing, token signing keys and the role rights table.

mod credential_hasher;
mod rights;
mod session_keys;

pub use credential_hasher::{CredentialHasher, DIGEST_HEX_LEN};
pub use rights::{Action, RoleRightsExt, Rights, UnknownRole, parse_role, rights_of};
pub use session_keys::{SESSION_ALGORITHM, SessionKeys, SessionKeysConfig};
