//! Petspot core library.
//!
//! Client-side session handling for the Petspot pet-adoption app:
//!
//! - `storage`: Key-value storage capability holding the session token
//! - `auth`: Token decoding, session checks, login/registration/logout
//! - `router`: Pages and the guards deciding which one may be shown
//! - `api`: HTTP client for the Petspot backend
//! - `config`: Configuration file and API base URL resolution
//! - `models`: Request/response payloads

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod router;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use router::{NavDecision, Navigation, Route, Router};
pub use storage::{FileStore, KeyValueStore, MemoryStore, TOKEN_KEY};
