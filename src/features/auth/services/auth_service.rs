use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::core::config::BootstrapAdmin;
use crate::core::error::{AppError, Result};
use crate::features::auth::clients::{ClientRegistry, OAuthClient};
use crate::features::auth::dtos::{AuthorizeForm, TokenRequestForm, TokenResponseDto};
use crate::features::auth::error::OAuthError;
use crate::features::auth::model::{AuthenticatedUser, UserAccount, UserRole, UserStatus};
use crate::features::auth::repositories::UserRepository;
use crate::features::auth::token::{IssuedTokens, TokenIssuer, TokenSubject};
use crate::shared::constants::{
    GRANT_TYPE_AUTHORIZATION_CODE, GRANT_TYPE_IMPLICIT, GRANT_TYPE_PASSWORD,
    GRANT_TYPE_REFRESH_TOKEN,
};
use crate::shared::password::{hash_password_blocking, verify_password_blocking};

type OAuthResult<T> = std::result::Result<T, OAuthError>;

/// Client id and secret presented to the token endpoint
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// OAuth2 authorization server: grants, authorize redirects and token checks
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    issuer: Arc<dyn TokenIssuer>,
    clients: ClientRegistry,
    /// Redeemed authorization code ids mapped to their expiry
    redeemed_codes: Mutex<HashMap<String, i64>>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        issuer: Arc<dyn TokenIssuer>,
        clients: ClientRegistry,
    ) -> Self {
        Self {
            users,
            issuer,
            clients,
            redeemed_codes: Mutex::new(HashMap::new()),
        }
    }

    /// `POST /oauth/token`
    pub async fn token(
        &self,
        basic: Option<ClientCredentials>,
        form: TokenRequestForm,
    ) -> OAuthResult<TokenResponseDto> {
        let credentials = basic
            .or_else(|| {
                form.client_id.clone().map(|client_id| ClientCredentials {
                    client_id,
                    client_secret: form.client_secret.clone().unwrap_or_default(),
                })
            })
            .ok_or_else(|| {
                OAuthError::InvalidClient(
                    "Full authentication is required to access this resource".to_string(),
                )
            })?;

        let client = self.authenticate_client(&credentials)?;
        let grant_type = form.grant_type.as_str();

        if grant_type == GRANT_TYPE_IMPLICIT {
            return Err(OAuthError::UnsupportedGrantType(
                "Implicit grant type not supported from token endpoint".to_string(),
            ));
        }

        if !client.allows_grant(grant_type) {
            return Err(OAuthError::UnauthorizedClient(format!(
                "Unauthorized grant type: {}",
                grant_type
            )));
        }

        let (tokens, account) = match grant_type {
            GRANT_TYPE_PASSWORD => self.password_grant(client, &form).await?,
            GRANT_TYPE_REFRESH_TOKEN => self.refresh_grant(client, &form).await?,
            GRANT_TYPE_AUTHORIZATION_CODE => self.authorization_code_grant(client, &form).await?,
            other => {
                return Err(OAuthError::UnsupportedGrantType(format!(
                    "Unsupported grant type: {}",
                    other
                )))
            }
        };

        tracing::info!(
            "Issued {} token for user {} via client {}",
            grant_type,
            account.username,
            client.client_id
        );

        Ok(token_response(tokens, &account))
    }

    /// `POST /oauth/authorize`; returns the redirect location
    pub async fn authorize(&self, form: AuthorizeForm) -> OAuthResult<String> {
        let client = self
            .clients
            .find(&form.client_id)
            .ok_or_else(|| OAuthError::InvalidClient("Bad client credentials".to_string()))?;

        let grant_type = match form.response_type.as_str() {
            "code" => GRANT_TYPE_AUTHORIZATION_CODE,
            "token" => GRANT_TYPE_IMPLICIT,
            other => {
                return Err(OAuthError::UnsupportedResponseType(format!(
                    "Unsupported response type: {}",
                    other
                )))
            }
        };

        if !client.allows_grant(grant_type) {
            return Err(OAuthError::UnauthorizedClient(format!(
                "Unauthorized grant type: {}",
                grant_type
            )));
        }

        let redirect_uri = form
            .redirect_uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| {
                OAuthError::InvalidRequest("A redirect_uri must be supplied".to_string())
            })?;

        let scopes = resolve_scopes(client, form.scope.as_deref())?;
        let account = self
            .authenticate_user(client, &form.username, &form.password)
            .await?;
        let subject = self.subject(&account).await?;

        let mut params: Vec<(&str, String)> = Vec::new();
        let separator = if grant_type == GRANT_TYPE_AUTHORIZATION_CODE {
            let code = self
                .issuer
                .issue_code(&subject, client, &scopes, Some(redirect_uri))?;
            params.push(("code", code));
            if redirect_uri.contains('?') {
                '&'
            } else {
                '?'
            }
        } else {
            let tokens = self.issuer.issue(&subject, client, &scopes, false)?;
            params.push(("access_token", tokens.access_token));
            params.push(("token_type", "bearer".to_string()));
            params.push(("expires_in", tokens.expires_in.to_string()));
            params.push(("scope", tokens.scope.join(" ")));
            params.push(("jti", tokens.jti));
            '#'
        };

        if let Some(state) = form.state.as_deref().filter(|s| !s.is_empty()) {
            params.push(("state", state.to_string()));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        tracing::info!(
            "Authorized {} for user {} via client {}",
            form.response_type,
            account.username,
            client.client_id
        );

        Ok(format!("{}{}{}", redirect_uri, separator, query))
    }

    /// Resolve the caller of a bearer access token
    pub fn authenticate_access_token(&self, access_token: &str) -> Result<AuthenticatedUser> {
        let claims = self.issuer.validate(access_token)?;
        Ok(claims.to_authenticated_user())
    }

    /// Create the configured admin account when it does not exist yet
    pub async fn ensure_bootstrap_admin(&self, admin: &BootstrapAdmin) -> Result<()> {
        if let Some(existing) = self.users.find_by_username(&admin.username).await? {
            if existing.role != UserRole::Admin {
                tracing::warn!(
                    "Bootstrap admin username {} is taken by a {:?} account",
                    admin.username,
                    existing.role
                );
            }
            return Ok(());
        }

        let password_hash = hash_password_blocking(admin.password.clone()).await?;
        let account = self
            .users
            .insert_account(
                &admin.username,
                &password_hash,
                UserRole::Admin,
                UserStatus::Active,
            )
            .await?;

        tracing::info!("Bootstrap admin created: id={}, username={}", account.id, account.username);
        Ok(())
    }

    fn authenticate_client(&self, credentials: &ClientCredentials) -> OAuthResult<&OAuthClient> {
        self.clients
            .find(&credentials.client_id)
            .filter(|client| client.secret_matches(&credentials.client_secret))
            .ok_or_else(|| OAuthError::InvalidClient("Bad client credentials".to_string()))
    }

    async fn password_grant(
        &self,
        client: &OAuthClient,
        form: &TokenRequestForm,
    ) -> OAuthResult<(IssuedTokens, UserAccount)> {
        let (username, password) = match (form.username.as_deref(), form.password.as_deref()) {
            (Some(username), Some(password)) => (username, password),
            _ => {
                return Err(OAuthError::InvalidRequest(
                    "Missing username or password".to_string(),
                ))
            }
        };

        let scopes = resolve_scopes(client, form.scope.as_deref())?;
        let account = self.authenticate_user(client, username, password).await?;
        let subject = self.subject(&account).await?;
        let tokens = self.issuer.issue(&subject, client, &scopes, true)?;

        Ok((tokens, account))
    }

    async fn refresh_grant(
        &self,
        client: &OAuthClient,
        form: &TokenRequestForm,
    ) -> OAuthResult<(IssuedTokens, UserAccount)> {
        let refresh_token = form
            .refresh_token
            .as_deref()
            .ok_or_else(|| OAuthError::InvalidRequest("Missing refresh_token".to_string()))?;

        let claims = self
            .issuer
            .validate_refresh(refresh_token)
            .map_err(|e| OAuthError::InvalidGrant(e.to_string()))?;

        if claims.client_id != client.client_id {
            return Err(OAuthError::InvalidGrant(format!(
                "Refresh token of client {} presented by {}",
                claims.client_id, client.client_id
            )));
        }

        let account = self.reload_account(client, claims.user_id).await?;
        let subject = self.subject(&account).await?;
        let tokens = self
            .issuer
            .refresh(refresh_token, &claims, &subject, client)?;

        Ok((tokens, account))
    }

    async fn authorization_code_grant(
        &self,
        client: &OAuthClient,
        form: &TokenRequestForm,
    ) -> OAuthResult<(IssuedTokens, UserAccount)> {
        let code = form
            .code
            .as_deref()
            .ok_or_else(|| OAuthError::InvalidRequest("Missing authorization code".to_string()))?;

        let claims = self
            .issuer
            .redeem_code(code)
            .map_err(|e| OAuthError::InvalidGrant(e.to_string()))?;

        if claims.client_id != client.client_id {
            return Err(OAuthError::InvalidGrant(format!(
                "Authorization code of client {} presented by {}",
                claims.client_id, client.client_id
            )));
        }

        if let Some(bound) = claims.redirect_uri.as_deref() {
            if form.redirect_uri.as_deref() != Some(bound) {
                return Err(OAuthError::InvalidGrant("Redirect URI mismatch".to_string()));
            }
        }

        self.mark_code_redeemed(&claims.jti, claims.exp)?;

        let account = self.reload_account(client, claims.user_id).await?;
        let subject = self.subject(&account).await?;
        let tokens = self.issuer.issue(&subject, client, &claims.scope, true)?;

        Ok((tokens, account))
    }

    /// Codes are single use; expired entries are pruned on every redemption
    fn mark_code_redeemed(&self, jti: &str, exp: i64) -> OAuthResult<()> {
        let now = Utc::now().timestamp();
        let mut redeemed = self
            .redeemed_codes
            .lock()
            .map_err(|_| AppError::Internal("Redeemed code registry poisoned".to_string()))?;

        redeemed.retain(|_, expiry| *expiry >= now);

        if redeemed.insert(jti.to_string(), exp).is_some() {
            return Err(OAuthError::InvalidGrant(
                "Authorization code already redeemed".to_string(),
            ));
        }
        Ok(())
    }

    async fn authenticate_user(
        &self,
        client: &OAuthClient,
        username: &str,
        password: &str,
    ) -> OAuthResult<UserAccount> {
        let username = login_name(client, username);
        let username = username.as_str();
        let account = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| OAuthError::InvalidGrant(format!("Unknown username {}", username)))?;

        let password_ok =
            verify_password_blocking(password.to_string(), account.password_hash.clone()).await?;
        if !password_ok {
            return Err(OAuthError::InvalidGrant(format!(
                "Bad password for {}",
                username
            )));
        }

        ensure_usable(client, &account)?;
        Ok(account)
    }

    async fn reload_account(&self, client: &OAuthClient, user_id: i64) -> OAuthResult<UserAccount> {
        let account = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| OAuthError::InvalidGrant(format!("Account {} no longer exists", user_id)))?;

        ensure_usable(client, &account)?;
        Ok(account)
    }

    async fn subject(&self, account: &UserAccount) -> OAuthResult<TokenSubject> {
        let user_details = self.users.find_user_details(account).await?;
        Ok(TokenSubject {
            user_id: account.id,
            username: account.username.clone(),
            role: account.role,
            status: account.status,
            user_details,
        })
    }
}

/// Accounts must be ACTIVE and of the client's role
fn ensure_usable(client: &OAuthClient, account: &UserAccount) -> OAuthResult<()> {
    if account.role != client.role {
        return Err(OAuthError::InvalidGrant(format!(
            "Account {} has role {:?}, client {} requires {:?}",
            account.username, account.role, client.client_id, client.role
        )));
    }

    if !account.is_active() {
        return Err(OAuthError::InvalidGrant(format!(
            "Account {} is {:?}",
            account.username, account.status
        )));
    }

    Ok(())
}

fn resolve_scopes(client: &OAuthClient, requested: Option<&str>) -> OAuthResult<Vec<String>> {
    client.resolve_scopes(requested).ok_or_else(|| {
        OAuthError::InvalidScope(format!(
            "Invalid scope: {}",
            requested.unwrap_or_default()
        ))
    })
}

fn token_response(tokens: IssuedTokens, account: &UserAccount) -> TokenResponseDto {
    TokenResponseDto {
        access_token: tokens.access_token,
        token_type: "bearer".to_string(),
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        scope: tokens.scope.join(" "),
        jti: tokens.jti,
        user_id: account.id,
        username: account.username.clone(),
        status: account.status,
    }
}

/// Public-user accounts are keyed by their lowercased email address
fn login_name(client: &OAuthClient, username: &str) -> String {
    let username = username.trim();
    if client.role == UserRole::PublicUser {
        username.to_lowercase()
    } else {
        username.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::token::JwtTokenIssuer;
    use crate::shared::test_helpers::{test_auth_config, InMemoryStore};
    use std::time::Duration;

    fn service(store: &InMemoryStore) -> AuthService {
        AuthService::new(
            Arc::new(store.clone()),
            Arc::new(JwtTokenIssuer::new("auth-service-test-key", Duration::from_secs(0))),
            ClientRegistry::from_config(&test_auth_config()),
        )
    }

    fn admin_client() -> Option<ClientCredentials> {
        Some(ClientCredentials {
            client_id: "admin".to_string(),
            client_secret: String::new(),
        })
    }

    fn password_form(username: &str, password: &str) -> TokenRequestForm {
        TokenRequestForm {
            grant_type: "password".to_string(),
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_password_grant_issues_tokens() {
        let store = InMemoryStore::new();
        let account = store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);
        let service = service(&store);

        let response = service
            .token(admin_client(), password_form("root", "root-pass-1"))
            .await
            .unwrap();

        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, 7200);
        assert_eq!(response.scope, "read write trust");
        assert_eq!(response.user_id, account.id);
        assert_eq!(response.username, "root");
        assert!(response.refresh_token.is_some());

        let user = service
            .authenticate_access_token(&response.access_token)
            .unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.client_id, "admin");
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_grant() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);

        let err = service(&store)
            .token(admin_client(), password_form("root", "nope"))
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::InvalidGrant(_)));
        assert_eq!(
            err.public_message(),
            "You have entered an invalid username or password"
        );
    }

    #[tokio::test]
    async fn test_client_only_authenticates_its_role() {
        let store = InMemoryStore::new();
        store.seed_account("shop", "vendor-pass", UserRole::Vendor, UserStatus::Active);

        let err = service(&store)
            .token(admin_client(), password_form("shop", "vendor-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::InvalidGrant(_)));

        let ok = service(&store)
            .token(
                Some(ClientCredentials {
                    client_id: "vendor".to_string(),
                    client_secret: String::new(),
                }),
                password_form("shop", "vendor-pass"),
            )
            .await
            .unwrap();
        assert_eq!(ok.expires_in, 86_400);
    }

    #[tokio::test]
    async fn test_pending_account_cannot_log_in() {
        let store = InMemoryStore::new();
        store.seed_account(
            "new@example.com",
            "pending-pass",
            UserRole::PublicUser,
            UserStatus::Pending,
        );

        let err = service(&store)
            .token(
                Some(ClientCredentials {
                    client_id: "public_user".to_string(),
                    client_secret: String::new(),
                }),
                password_form("new@example.com", "pending-pass"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::InvalidGrant(_)));
    }

    #[tokio::test]
    async fn test_public_user_login_ignores_email_case() {
        let store = InMemoryStore::new();
        let account = store.seed_public_user("alice@example.com", UserStatus::Active);

        let response = service(&store)
            .token(
                Some(ClientCredentials {
                    client_id: "public_user".to_string(),
                    client_secret: String::new(),
                }),
                password_form(" Alice@Example.COM ", "public-pass"),
            )
            .await
            .unwrap();

        assert_eq!(response.user_id, account.id);
        assert_eq!(response.username, "alice@example.com");
    }

    #[tokio::test]
    async fn test_admin_username_stays_case_sensitive() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);

        let err = service(&store)
            .token(admin_client(), password_form("ROOT", "root-pass-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::InvalidGrant(_)));
    }

    #[tokio::test]
    async fn test_bad_client_secret_is_invalid_client() {
        let store = InMemoryStore::new();

        let err = service(&store)
            .token(
                Some(ClientCredentials {
                    client_id: "admin".to_string(),
                    client_secret: "wrong".to_string(),
                }),
                password_form("root", "x"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::InvalidClient(_)));

        let err = service(&store)
            .token(None, password_form("root", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::InvalidClient(_)));
    }

    #[tokio::test]
    async fn test_form_client_credentials_are_accepted() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);

        let mut form = password_form("root", "root-pass-1");
        form.client_id = Some("admin".to_string());

        assert!(service(&store).token(None, form).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_grant_issues_new_access_token_for_same_user() {
        let store = InMemoryStore::new();
        let account = store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);
        let service = service(&store);

        let first = service
            .token(admin_client(), password_form("root", "root-pass-1"))
            .await
            .unwrap();
        let refresh_token = first.refresh_token.clone().unwrap();

        let refreshed = service
            .token(
                admin_client(),
                TokenRequestForm {
                    grant_type: "refresh_token".to_string(),
                    refresh_token: Some(refresh_token.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(refreshed.user_id, account.id);
        assert_eq!(refreshed.refresh_token, Some(refresh_token));
        assert_ne!(refreshed.jti, first.jti);
    }

    #[tokio::test]
    async fn test_refresh_token_from_other_client_is_rejected() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);
        let service = service(&store);

        let first = service
            .token(admin_client(), password_form("root", "root-pass-1"))
            .await
            .unwrap();

        let err = service
            .token(
                Some(ClientCredentials {
                    client_id: "vendor".to_string(),
                    client_secret: String::new(),
                }),
                TokenRequestForm {
                    grant_type: "refresh_token".to_string(),
                    refresh_token: first.refresh_token,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::InvalidGrant(_)));
    }

    #[tokio::test]
    async fn test_implicit_at_token_endpoint_is_unsupported() {
        let store = InMemoryStore::new();

        let err = service(&store)
            .token(
                admin_client(),
                TokenRequestForm {
                    grant_type: "implicit".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::UnsupportedGrantType(_)));
    }

    #[tokio::test]
    async fn test_authorization_code_flow() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);
        let service = service(&store);

        let location = service
            .authorize(AuthorizeForm {
                response_type: "code".to_string(),
                client_id: "admin".to_string(),
                redirect_uri: Some("https://admin.example/cb".to_string()),
                state: Some("xyz".to_string()),
                username: "root".to_string(),
                password: "root-pass-1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(location.starts_with("https://admin.example/cb?code="));
        assert!(location.ends_with("&state=xyz"));

        let code = location
            .trim_start_matches("https://admin.example/cb?code=")
            .split('&')
            .next()
            .unwrap()
            .to_string();
        let code = urlencoding::decode(&code).unwrap().into_owned();

        let redeem = |code: String| TokenRequestForm {
            grant_type: "authorization_code".to_string(),
            code: Some(code),
            redirect_uri: Some("https://admin.example/cb".to_string()),
            ..Default::default()
        };

        let tokens = service
            .token(admin_client(), redeem(code.clone()))
            .await
            .unwrap();
        assert_eq!(tokens.username, "root");

        let replay = service
            .token(admin_client(), redeem(code))
            .await
            .unwrap_err();
        assert!(matches!(replay, OAuthError::InvalidGrant(_)));
    }

    #[tokio::test]
    async fn test_implicit_authorize_puts_token_in_fragment() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);

        let location = service(&store)
            .authorize(AuthorizeForm {
                response_type: "token".to_string(),
                client_id: "admin".to_string(),
                redirect_uri: Some("https://admin.example/cb".to_string()),
                username: "root".to_string(),
                password: "root-pass-1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(location.starts_with("https://admin.example/cb#access_token="));
        assert!(location.contains("token_type=bearer"));
        assert!(!location.contains("refresh_token"));
    }

    #[tokio::test]
    async fn test_authorize_requires_redirect_uri() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);

        let err = service(&store)
            .authorize(AuthorizeForm {
                response_type: "code".to_string(),
                client_id: "admin".to_string(),
                username: "root".to_string(),
                password: "root-pass-1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_created_once() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let admin = BootstrapAdmin {
            username: "bootstrap".to_string(),
            password: "bootstrap-pass".to_string(),
        };

        service.ensure_bootstrap_admin(&admin).await.unwrap();
        service.ensure_bootstrap_admin(&admin).await.unwrap();

        assert_eq!(store.account_count(), 1);
        assert!(service
            .token(admin_client(), password_form("bootstrap", "bootstrap-pass"))
            .await
            .is_ok());
    }
}
