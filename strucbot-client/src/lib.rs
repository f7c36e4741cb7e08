//! # strucbot-client
//!
//! Typed client for the strucbot API. This crate carries the application
//! logic of the chat frontend - the API client with its global session
//! interceptor, the persisted auth state, the route guard and the chat
//! message log - independent of any particular rendering layer.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::{Arc, RwLock};
//! use strucbot_client::{ApiClient, AuthStore, FileStorage};
//!
//! let storage = FileStorage::new("./state");
//! let auth = Arc::new(RwLock::new(AuthStore::new(Box::new(storage))));
//! let client = ApiClient::new("http://localhost:4000/api", auth).unwrap();
//! # let _ = client;
//! ```

pub mod api;
pub mod auth;
pub mod chat;
pub mod routes;
pub mod storage;

// Re-exports for convenient access
pub use api::{ApiClient, ApiError};
pub use auth::AuthStore;
pub use chat::{ChatMessage, ChatSession, MessageBody, Sender};
pub use routes::{Route, resolve};
pub use storage::{AuthStorage, FileStorage, MemoryStorage, PersistedAuth, StorageError};
