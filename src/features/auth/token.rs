//! Token issuance and validation.
//!
//! Access tokens, refresh tokens and authorization codes are all HS256 JWTs
//! signed with the same key; the `kind` claim keeps them from being used in
//! place of one another.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::clients::OAuthClient;
use crate::features::auth::model::{AuthenticatedUser, UserDetailsClaim, UserRole, UserStatus};
use crate::shared::constants::AUTHORIZATION_CODE_VALIDITY_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
    Code,
}

/// The account a token is issued for
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub user_details: Option<UserDetailsClaim>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub kind: TokenKind,
    pub sub: String,
    pub user_id: i64,
    pub client_id: String,
    pub role: UserRole,
    pub authorities: Vec<String>,
    pub scope: Vec<String>,
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_details: Option<UserDetailsClaim>,
    /// Bound redirect URI (authorization codes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn to_authenticated_user(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: self.user_id,
            username: self.sub.clone(),
            client_id: self.client_id.clone(),
            role: self.role,
            authorities: self.authorities.clone(),
            scopes: self.scope.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub scope: Vec<String>,
    pub jti: String,
}

/// Token capability used by the OAuth endpoints and the auth middleware
pub trait TokenIssuer: Send + Sync {
    /// Issue an access token, plus a refresh token when `with_refresh` is set
    fn issue(
        &self,
        subject: &TokenSubject,
        client: &OAuthClient,
        scopes: &[String],
        with_refresh: bool,
    ) -> Result<IssuedTokens>;

    /// Issue a fresh access token for a validated refresh token, which is returned unchanged
    fn refresh(
        &self,
        refresh_token: &str,
        refresh_claims: &TokenClaims,
        subject: &TokenSubject,
        client: &OAuthClient,
    ) -> Result<IssuedTokens>;

    /// Validate an access token
    fn validate(&self, access_token: &str) -> Result<TokenClaims>;

    fn validate_refresh(&self, refresh_token: &str) -> Result<TokenClaims>;

    /// Mint a short-lived authorization code
    fn issue_code(
        &self,
        subject: &TokenSubject,
        client: &OAuthClient,
        scopes: &[String],
        redirect_uri: Option<&str>,
    ) -> Result<String>;

    fn redeem_code(&self, code: &str) -> Result<TokenClaims>;
}

pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    leeway: u64,
}

impl JwtTokenIssuer {
    pub fn new(signing_key: &str, leeway: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    fn claims(
        &self,
        kind: TokenKind,
        subject: &TokenSubject,
        client: &OAuthClient,
        scopes: &[String],
        validity_secs: i64,
    ) -> TokenClaims {
        let now = Utc::now().timestamp();
        TokenClaims {
            kind,
            sub: subject.username.clone(),
            user_id: subject.user_id,
            client_id: client.client_id.clone(),
            role: subject.role,
            authorities: vec![subject.role.authority().to_string()],
            scope: scopes.to_vec(),
            status: subject.status,
            user_details: subject.user_details.clone(),
            redirect_uri: None,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + validity_secs,
        }
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AppError::Internal(format!("Failed to sign token: {}", e))
        })
    }

    fn decode_kind(&self, token: &str, expected: TokenKind) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.validate_exp = true;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?
            .claims;

        if claims.kind != expected {
            return Err(AppError::Unauthorized(format!(
                "Expected {:?} token, got {:?}",
                expected, claims.kind
            )));
        }

        Ok(claims)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(
        &self,
        subject: &TokenSubject,
        client: &OAuthClient,
        scopes: &[String],
        with_refresh: bool,
    ) -> Result<IssuedTokens> {
        let access = self.claims(
            TokenKind::Access,
            subject,
            client,
            scopes,
            client.access_token_validity_secs,
        );
        let access_token = self.sign(&access)?;

        let refresh_token = if with_refresh {
            let refresh = self.claims(
                TokenKind::Refresh,
                subject,
                client,
                scopes,
                client.refresh_token_validity_secs,
            );
            Some(self.sign(&refresh)?)
        } else {
            None
        };

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            expires_in: client.access_token_validity_secs,
            scope: access.scope,
            jti: access.jti,
        })
    }

    fn refresh(
        &self,
        refresh_token: &str,
        refresh_claims: &TokenClaims,
        subject: &TokenSubject,
        client: &OAuthClient,
    ) -> Result<IssuedTokens> {
        let access = self.claims(
            TokenKind::Access,
            subject,
            client,
            &refresh_claims.scope,
            client.access_token_validity_secs,
        );

        Ok(IssuedTokens {
            access_token: self.sign(&access)?,
            refresh_token: Some(refresh_token.to_string()),
            expires_in: client.access_token_validity_secs,
            scope: access.scope,
            jti: access.jti,
        })
    }

    fn validate(&self, access_token: &str) -> Result<TokenClaims> {
        self.decode_kind(access_token, TokenKind::Access)
    }

    fn validate_refresh(&self, refresh_token: &str) -> Result<TokenClaims> {
        self.decode_kind(refresh_token, TokenKind::Refresh)
    }

    fn issue_code(
        &self,
        subject: &TokenSubject,
        client: &OAuthClient,
        scopes: &[String],
        redirect_uri: Option<&str>,
    ) -> Result<String> {
        let mut claims = self.claims(
            TokenKind::Code,
            subject,
            client,
            scopes,
            AUTHORIZATION_CODE_VALIDITY_SECONDS,
        );
        claims.redirect_uri = redirect_uri.map(str::to_string);
        self.sign(&claims)
    }

    fn redeem_code(&self, code: &str) -> Result<TokenClaims> {
        self.decode_kind(code, TokenKind::Code)
    }
}
