//! Authentication Module
//!
//! Signs users in and out and keeps the token and identity record in
//! storage. Token issuance is the API's business; this side only stores it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{Result, StorefrontError};
use crate::models::{LoginRequest, RegisterRequest};
use crate::storage::{read_json, write_json, Storage, TOKEN_KEY, USER_KEY};

// == User Record ==
/// Minimal identity persisted after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub logged_in_at: DateTime<Utc>,
}

// == Auth ==
/// Login state backed by durable storage.
#[derive(Clone)]
pub struct Auth {
    api: ApiClient,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl Auth {
    /// Creates the auth component over `api` and `storage`.
    pub fn new(api: ApiClient, storage: Arc<dyn Storage>) -> Self {
        Self { api, storage }
    }

    // == Login ==
    /// Exchanges credentials for an access token and stores it together
    /// with the user record.
    ///
    /// The token is written last, so a storage failure never leaves the
    /// session logged in.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await?;

        let user = UserRecord {
            email: email.to_string(),
            logged_in_at: Utc::now(),
        };
        write_json(self.storage.as_ref(), USER_KEY, &user)?;
        if let Err(e) = write_json(self.storage.as_ref(), TOKEN_KEY, &response.access_token) {
            if let Err(cleanup) = self.storage.remove(USER_KEY) {
                warn!("Failed to roll back user record: {}", cleanup);
            }
            return Err(e);
        }

        info!("Logged in as {}", user.email);
        Ok(user)
    }

    // == Register ==
    /// Creates an account, then logs into it.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<UserRecord> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        };
        if let Some(message) = request.validate() {
            return Err(StorefrontError::InvalidRequest(message));
        }

        self.api.register(&request).await?;
        self.login(email, password).await
    }

    // == Logout ==
    /// Forgets the token and user record. Storage failures are logged.
    pub fn logout(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to remove '{}' on logout: {}", key, e);
            }
        }
        info!("Logged out");
    }

    // == State ==
    /// Returns true if a token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Returns the stored token, if any and readable.
    pub fn token(&self) -> Option<String> {
        read_json::<String>(self.storage.as_ref(), TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    /// Returns the stored user record, if any and readable.
    pub fn current_user(&self) -> Option<UserRecord> {
        match read_json(self.storage.as_ref(), USER_KEY) {
            Ok(user) => user,
            Err(e) => {
                warn!("Stored user record unreadable: {}", e);
                None
            }
        }
    }
}
