use std::collections::HashMap;
use std::sync::RwLock;

use strucbot_api::{Role, SchemaRecord};
use uuid::Uuid;

use crate::auth::password::PasswordManager;
use crate::store::error::StoreError;
use crate::store::models::{NewUser, ProfileChanges, User};
use crate::store::{SchemaStore, UserStore};

pub const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@strucbot.com";
const ADMIN_PASSWORD: &str = "admin123";

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    schemas: HashMap<Uuid, Vec<SchemaRecord>>,
}

/// Process-local store. The `RwLock` makes per-operation atomicity an
/// explicit contract under the multi-threaded runtime: each operation takes
/// the lock for the duration of a single synchronous mutation, and no
/// transaction spans more than one operation.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the fixed demo admin account so the API is usable before any
    /// registration. Called once at startup.
    pub fn seed_admin(&self) -> anyhow::Result<()> {
        let password_hash = PasswordManager::hash(ADMIN_PASSWORD)?;
        let admin = self.insert(NewUser {
            username: ADMIN_USERNAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash,
            role: Role::Admin,
        })?;
        tracing::info!("Seeded demo admin account: {}", admin.username);
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("store lock poisoned")
    }
}

impl UserStore for MemoryStore {
    fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.write();

        if inner
            .users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(StoreError::Duplicate(
                "Username or email already exists".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
        };

        inner.users.push(user.clone());
        inner.schemas.insert(user.id, Vec::new());

        Ok(user)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.read().users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_login(&self, username_or_email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .users
            .iter()
            .find(|u| u.username == username_or_email || u.email == username_or_email)
            .cloned())
    }

    fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<User, StoreError> {
        let mut inner = self.write();

        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;

        if let Some(username) = &changes.username {
            user.username = username.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }

        Ok(user.clone())
    }
}

impl SchemaStore for MemoryStore {
    fn list(&self, user_id: Uuid) -> Result<Vec<SchemaRecord>, StoreError> {
        Ok(self.read().schemas.get(&user_id).cloned().unwrap_or_default())
    }

    fn append(&self, user_id: Uuid, record: SchemaRecord) -> Result<(), StoreError> {
        self.write().schemas.entry(user_id).or_default().push(record);
        Ok(())
    }

    fn remove(&self, user_id: Uuid, schema_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.write();

        let records = inner
            .schemas
            .get_mut(&user_id)
            .ok_or_else(|| StoreError::NotFound("Schema not found".to_string()))?;

        let before = records.len();
        records.retain(|r| r.id != schema_id);

        if records.len() == before {
            return Err(StoreError::NotFound("Schema not found".to_string()));
        }

        Ok(())
    }
}
