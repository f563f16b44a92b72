//! Request and response bodies exchanged with the Petspot API.
//!
//! - `LoginPayload`, `LoginResponse`: `POST /auth/login`
//! - `RegisterPayload`: `POST /api/owners`

pub mod payload;

pub use payload::{LoginPayload, LoginResponse, RegisterPayload};
