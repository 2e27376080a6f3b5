//! Registered OAuth clients.

use crate::core::config::AuthConfig;
use crate::features::auth::model::UserRole;
use crate::shared::constants::{
    ADMIN_ACCESS_TOKEN_VALIDITY_SECONDS, ADMIN_CLIENT_ID, ADMIN_REFRESH_TOKEN_VALIDITY_SECONDS,
    GRANT_TYPE_AUTHORIZATION_CODE, GRANT_TYPE_IMPLICIT, GRANT_TYPE_PASSWORD,
    GRANT_TYPE_REFRESH_TOKEN, PUBLIC_USER_ACCESS_TOKEN_VALIDITY_SECONDS, PUBLIC_USER_CLIENT_ID,
    PUBLIC_USER_REFRESH_TOKEN_VALIDITY_SECONDS, SCOPE_READ, SCOPE_TRUST, SCOPE_WRITE,
    VENDOR_ACCESS_TOKEN_VALIDITY_SECONDS, VENDOR_CLIENT_ID, VENDOR_REFRESH_TOKEN_VALIDITY_SECONDS,
};

const ALL_GRANT_TYPES: [&str; 4] = [
    GRANT_TYPE_PASSWORD,
    GRANT_TYPE_AUTHORIZATION_CODE,
    GRANT_TYPE_REFRESH_TOKEN,
    GRANT_TYPE_IMPLICIT,
];

const ALL_SCOPES: [&str; 3] = [SCOPE_READ, SCOPE_WRITE, SCOPE_TRUST];

#[derive(Debug, Clone)]
pub struct OAuthClient {
    pub client_id: String,
    secret: String,
    /// The only account role this client may authenticate
    pub role: UserRole,
    pub access_token_validity_secs: i64,
    pub refresh_token_validity_secs: i64,
    pub grant_types: Vec<String>,
    pub scopes: Vec<String>,
}

impl OAuthClient {
    fn new(
        client_id: &str,
        secret: &str,
        role: UserRole,
        access_token_validity_secs: i64,
        refresh_token_validity_secs: i64,
    ) -> Self {
        Self {
            client_id: client_id.to_string(),
            secret: secret.to_string(),
            role,
            access_token_validity_secs,
            refresh_token_validity_secs,
            grant_types: ALL_GRANT_TYPES.iter().map(|g| g.to_string()).collect(),
            scopes: ALL_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn allows_grant(&self, grant_type: &str) -> bool {
        self.grant_types.iter().any(|g| g == grant_type)
    }

    pub fn secret_matches(&self, secret: &str) -> bool {
        self.secret == secret
    }

    /// Resolve requested scopes; `None` or blank means every scope of the client.
    /// Returns `None` when any requested scope is not registered.
    pub fn resolve_scopes(&self, requested: Option<&str>) -> Option<Vec<String>> {
        let requested: Vec<&str> = requested
            .map(|s| s.split([' ', ',']).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        if requested.is_empty() {
            return Some(self.scopes.clone());
        }

        if requested.iter().all(|r| self.scopes.iter().any(|s| s == r)) {
            Some(requested.into_iter().map(str::to_string).collect())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientRegistry {
    clients: Vec<OAuthClient>,
}

impl ClientRegistry {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            clients: vec![
                OAuthClient::new(
                    ADMIN_CLIENT_ID,
                    &config.admin_client_secret,
                    UserRole::Admin,
                    ADMIN_ACCESS_TOKEN_VALIDITY_SECONDS,
                    ADMIN_REFRESH_TOKEN_VALIDITY_SECONDS,
                ),
                OAuthClient::new(
                    PUBLIC_USER_CLIENT_ID,
                    &config.public_user_client_secret,
                    UserRole::PublicUser,
                    PUBLIC_USER_ACCESS_TOKEN_VALIDITY_SECONDS,
                    PUBLIC_USER_REFRESH_TOKEN_VALIDITY_SECONDS,
                ),
                OAuthClient::new(
                    VENDOR_CLIENT_ID,
                    &config.vendor_client_secret,
                    UserRole::Vendor,
                    VENDOR_ACCESS_TOKEN_VALIDITY_SECONDS,
                    VENDOR_REFRESH_TOKEN_VALIDITY_SECONDS,
                ),
            ],
        }
    }

    pub fn find(&self, client_id: &str) -> Option<&OAuthClient> {
        self.clients.iter().find(|c| c.client_id == client_id)
    }
}
