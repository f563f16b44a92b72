use anyhow::{bail, Context, Result};
use tracing::{error, info};

use crate::api::ApiClient;
use crate::models::{LoginPayload, RegisterPayload};
use crate::storage::{KeyValueStore, TOKEN_KEY};

/// Log in and store the issued token under [`TOKEN_KEY`].
///
/// Nothing is written to `store` unless the remote login succeeds.
pub async fn try_login<S: KeyValueStore + ?Sized>(
    api: &ApiClient,
    store: &mut S,
    payload: &LoginPayload,
) -> Result<()> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        bail!("Email and password required");
    }

    let token = api.login(payload).await.context("Login request failed")?;
    store
        .set(TOKEN_KEY, &token)
        .context("Failed to store session token")?;

    info!(email = %payload.email, "Login successful");
    Ok(())
}

/// Boolean form of [`try_login`]: failures are logged and reported as `false`.
pub async fn login<S: KeyValueStore + ?Sized>(
    api: &ApiClient,
    store: &mut S,
    payload: &LoginPayload,
) -> bool {
    match try_login(api, store, payload).await {
        Ok(()) => true,
        Err(e) => {
            let message = format!("{:#}", e);
            error!(error = %message, "Error during login");
            false
        }
    }
}

/// Register a new owner account. Does not log the owner in.
pub async fn try_register_user(api: &ApiClient, payload: &RegisterPayload) -> Result<()> {
    if let Some(field) = payload.first_missing_field() {
        bail!("Field '{}' is required", field);
    }

    api.register(payload)
        .await
        .context("Registration request failed")?;

    info!(email = %payload.email, "Owner registered");
    Ok(())
}

/// Boolean form of [`try_register_user`].
pub async fn register_user(api: &ApiClient, payload: &RegisterPayload) -> bool {
    match try_register_user(api, payload).await {
        Ok(()) => true,
        Err(e) => {
            let message = format!("{:#}", e);
            error!(error = %message, "Error registering owner");
            false
        }
    }
}
