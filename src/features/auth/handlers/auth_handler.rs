use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::features::auth::dtos::{AuthorizeForm, TokenRequestForm, TokenResponseDto};
use crate::features::auth::error::{OAuthError, OAuthErrorBody};
use crate::features::auth::services::{AuthService, ClientCredentials};

/// Issue tokens (password, refresh_token and authorization_code grants)
#[utoipa::path(
    post,
    path = "/oauth/token",
    request_body(content = TokenRequestForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponseDto),
        (status = 401, description = "Client, grant or request rejected", body = OAuthErrorBody)
    ),
    tag = "oauth",
    security(("basic_client" = []))
)]
pub async fn token(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
    form: Result<Form<TokenRequestForm>, FormRejection>,
) -> Result<Json<TokenResponseDto>, OAuthError> {
    let Form(form) = form.map_err(|e| OAuthError::InvalidRequest(e.body_text()))?;
    let basic = basic_client_credentials(&headers);

    let response = service.token(basic, form).await?;
    Ok(Json(response))
}

/// Authorization endpoint for the code and implicit grants; answers with a redirect
#[utoipa::path(
    post,
    path = "/oauth/authorize",
    request_body(content = AuthorizeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect carrying the code (query) or token (fragment)"),
        (status = 401, description = "Client, user or request rejected", body = OAuthErrorBody)
    ),
    tag = "oauth"
)]
pub async fn authorize(
    State(service): State<Arc<AuthService>>,
    form: Result<Form<AuthorizeForm>, FormRejection>,
) -> Result<Response, OAuthError> {
    let Form(form) = form.map_err(|e| OAuthError::InvalidRequest(e.body_text()))?;

    let location = service.authorize(form).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Client credentials from an `Authorization: Basic` header
fn basic_client_credentials(headers: &HeaderMap) -> Option<ClientCredentials> {
    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?
        .strip_prefix("Basic ")?;

    let decoded = String::from_utf8(BASE64.decode(encoded.trim()).ok()?).ok()?;
    let (client_id, client_secret) = decoded.split_once(':')?;

    Some(ClientCredentials {
        client_id: client_id.to_string(),
        client_secret: client_secret.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::clients::ClientRegistry;
    use crate::features::auth::model::{UserRole, UserStatus};
    use crate::features::auth::routes;
    use crate::features::auth::token::JwtTokenIssuer;
    use crate::shared::test_helpers::{test_auth_config, InMemoryStore};
    use axum::http::HeaderValue;
    use axum_test::TestServer;
    use serde_json::Value;
    use std::time::Duration;

    fn server(store: &InMemoryStore) -> TestServer {
        let service = Arc::new(AuthService::new(
            Arc::new(store.clone()),
            Arc::new(JwtTokenIssuer::new("handler-test-key", Duration::from_secs(0))),
            ClientRegistry::from_config(&test_auth_config()),
        ));
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn basic(client_id: &str) -> HeaderValue {
        let encoded = BASE64.encode(format!("{}:", client_id));
        HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap()
    }

    #[test]
    fn test_basic_credentials_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, basic("vendor"));

        let credentials = basic_client_credentials(&headers).unwrap();
        assert_eq!(credentials.client_id, "vendor");
        assert_eq!(credentials.client_secret, "");

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert!(basic_client_credentials(&headers).is_none());
    }

    #[tokio::test]
    async fn test_token_endpoint_success() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);
        let server = server(&store);

        let response = server
            .post("/oauth/token")
            .add_header(header::AUTHORIZATION, basic("admin"))
            .form(&[
                ("grant_type", "password"),
                ("username", "root"),
                ("password", "root-pass-1"),
            ])
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["token_type"], "bearer");
        assert_eq!(body["username"], "root");
        assert_eq!(body["status"], "ACTIVE");
        assert!(body["access_token"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_token_endpoint_bad_credentials_is_401_with_fixed_message() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);
        let server = server(&store);

        let response = server
            .post("/oauth/token")
            .add_header(header::AUTHORIZATION, basic("admin"))
            .form(&[
                ("grant_type", "password"),
                ("username", "root"),
                ("password", "wrong"),
            ])
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "invalid_grant");
        assert_eq!(
            body["message"],
            "You have entered an invalid username or password"
        );
    }

    #[tokio::test]
    async fn test_authorize_redirects_with_code() {
        let store = InMemoryStore::new();
        store.seed_account("root", "root-pass-1", UserRole::Admin, UserStatus::Active);
        let server = server(&store);

        let response = server
            .post("/oauth/authorize")
            .form(&[
                ("response_type", "code"),
                ("client_id", "admin"),
                ("redirect_uri", "https://admin.example/cb"),
                ("username", "root"),
                ("password", "root-pass-1"),
            ])
            .await;

        response.assert_status(StatusCode::FOUND);
        let location = response.header(header::LOCATION);
        assert!(location
            .to_str()
            .unwrap()
            .starts_with("https://admin.example/cb?code="));
    }
}
