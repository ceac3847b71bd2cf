//! Application state and dependency injection.

use libris_postgres::types::UserRole;

use crate::service::{
    CredentialHasher, MemoryStore, Result, ServiceConfig, ServiceStore, SessionKeys,
};

/// Decisions applied when a new account is registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationPolicy {
    /// Role stored for every newly registered user.
    pub default_role: UserRole,
}

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    store: ServiceStore,

    credential_hasher: CredentialHasher,
    session_keys: SessionKeys,
    registration_policy: RegistrationPolicy,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Opens the store (running migrations for Postgres) and derives the
    /// token signing keys.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let service_state = Self {
            store: config.open_store().await?,

            credential_hasher: CredentialHasher::new(),
            session_keys: config.load_session_keys()?,
            registration_policy: RegistrationPolicy {
                default_role: config.default_user_role,
            },
        };

        Ok(service_state)
    }

    /// Builds state over an already opened store.
    pub fn with_store(store: ServiceStore, session_keys: SessionKeys) -> Self {
        Self {
            store,
            credential_hasher: CredentialHasher::new(),
            session_keys,
            registration_policy: RegistrationPolicy::default(),
        }
    }

    /// Builds state over a fresh [`MemoryStore`].
    pub fn in_memory(session_keys: SessionKeys) -> Self {
        Self::with_store(ServiceStore::new(MemoryStore::new()), session_keys)
    }

    /// Replaces the role assigned at registration.
    pub fn with_default_role(mut self, role: UserRole) -> Self {
        self.registration_policy.default_role = role;
        self
    }

    /// Returns the store handle.
    #[inline]
    pub fn store(&self) -> &ServiceStore {
        &self.store
    }

    /// Returns the token signing keys.
    #[inline]
    pub fn session_keys(&self) -> &SessionKeys {
        &self.session_keys
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(store: ServiceStore);

impl_di!(credential_hasher: CredentialHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(registration_policy: RegistrationPolicy);
