//! REST API client module for the Petspot backend.
//!
//! This module provides the `ApiClient` for the two endpoints the client
//! uses: owner login (which issues the session token) and owner registration.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
