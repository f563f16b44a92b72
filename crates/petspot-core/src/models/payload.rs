use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

impl LoginPayload {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LoginResponse {
    pub token: String,
}

/// New owner account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl RegisterPayload {
    /// Name of the first empty field, if any
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("phone", &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}
