//! Role guards for handlers.
//!
//! Each guard reads the [`AuthenticatedUser`] placed in the request extensions by
//! the auth middleware and checks its role. Roles are disjoint: an admin token
//! does not open vendor or public-user routes.

use crate::core::error::AppError;
use crate::features::auth::model::{AuthenticatedUser, UserRole};
use axum::{extract::FromRequestParts, http::request::Parts};

fn require_role(parts: &Parts, role: UserRole) -> Result<AuthenticatedUser, AppError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

    if !user.has_role(role) {
        return Err(AppError::Forbidden(format!(
            "Access denied for role {:?}",
            user.role
        )));
    }

    Ok(user.clone())
}

/// Guard for `/admin/**` handlers.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Admin).map(RequireAdmin)
    }
}

/// Guard for `/vendor/**` handlers
pub struct RequireVendor(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireVendor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Vendor).map(RequireVendor)
    }
}

/// Guard for authenticated `/public/**` handlers
pub struct RequirePublicUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequirePublicUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::PublicUser).map(RequirePublicUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::authenticated_user;
    use axum::http::Request;

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn test_missing_user_is_unauthorized() {
        let mut parts = parts_with(None);
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden() {
        let mut parts = parts_with(Some(authenticated_user(3, UserRole::Vendor)));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_matching_role_passes() {
        let mut parts = parts_with(Some(authenticated_user(3, UserRole::Vendor)));
        let RequireVendor(user) = RequireVendor::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.user_id, 3);

        let mut parts = parts_with(Some(authenticated_user(4, UserRole::PublicUser)));
        assert!(RequirePublicUser::from_request_parts(&mut parts, &())
            .await
            .is_ok());
    }
}
