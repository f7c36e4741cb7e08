pub mod error;
pub mod memory;
pub mod models;

use strucbot_api::SchemaRecord;
use uuid::Uuid;

use self::error::StoreError;
use self::models::{NewUser, ProfileChanges, User};

/// Interface over user records so handlers stay independent of the backing
/// engine. The demo backs it with [`memory::MemoryStore`]; a persistent
/// implementation can be swapped in without touching handler logic.
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] when the username or email is
    /// already taken. Also initializes the new user's empty schema
    /// collection.
    fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Looks up by username or email, whichever matches.
    fn find_by_login(&self, username_or_email: &str) -> Result<Option<User>, StoreError>;

    /// Applies the provided fields in place. Fails with
    /// [`StoreError::NotFound`] when the user id is absent.
    fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<User, StoreError>;
}

/// Per-user schema record collections, insertion-ordered.
pub trait SchemaStore: Send + Sync {
    /// Records in insertion order, most-recently-added last. Empty when the
    /// user has none.
    fn list(&self, user_id: Uuid) -> Result<Vec<SchemaRecord>, StoreError>;

    fn append(&self, user_id: Uuid, record: SchemaRecord) -> Result<(), StoreError>;

    /// Removes the matching record. Fails with [`StoreError::NotFound`] when
    /// no record with that id exists in that user's collection; another
    /// user's record id is indistinguishable from an unknown one.
    fn remove(&self, user_id: Uuid, schema_id: Uuid) -> Result<(), StoreError>;
}
