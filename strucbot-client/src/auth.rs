use strucbot_api::UserResponse;

use crate::storage::{AuthStorage, PersistedAuth, StorageError};

/// Client-side session state: the bearer token and the signed-in user,
/// written through to the pluggable storage so a session survives restarts.
pub struct AuthStore {
    storage: Box<dyn AuthStorage>,
    token: Option<String>,
    user: Option<UserResponse>,
}

impl AuthStore {
    /// Loads any persisted session. Corrupt or unreadable state is
    /// discarded, not repaired.
    pub fn new(storage: Box<dyn AuthStorage>) -> Self {
        let persisted = storage.load().unwrap_or_else(|e| {
            tracing::warn!("Discarding persisted auth state: {e}");
            None
        });

        let (token, user) = match persisted {
            Some(p) => (Some(p.token), Some(p.user)),
            None => (None, None),
        };

        Self {
            storage,
            token,
            user,
        }
    }

    pub fn login(&mut self, user: UserResponse, token: String) -> Result<(), StorageError> {
        self.storage.save(&PersistedAuth {
            token: token.clone(),
            user: user.clone(),
        })?;

        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Drops the session, in memory and on disk. Storage failures are not
    /// allowed to keep a dead session alive.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;

        if let Err(e) = self.storage.clear() {
            tracing::warn!("Failed to clear persisted auth state: {e}");
        }
    }

    pub fn set_user(&mut self, user: UserResponse) {
        self.user = Some(user.clone());

        if let Some(token) = &self.token
            && let Err(e) = self.storage.save(&PersistedAuth {
                token: token.clone(),
                user,
            })
        {
            tracing::warn!("Failed to persist updated user: {e}");
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserResponse> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
