use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::vendors::handlers;
use crate::features::vendors::services::VendorService;

/// Create routes for vendor administration and the vendor's own profile
pub fn routes(service: Arc<VendorService>) -> Router {
    Router::new()
        .route("/admin/vendor/save", post(handlers::save_vendor))
        .route("/admin/vendor/all", get(handlers::get_all_vendors))
        .route("/vendor/profile", get(handlers::get_profile))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::UserRole;
    use crate::shared::test_helpers::{authenticated_user, with_auth, InMemoryStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server(store: &InMemoryStore, role: UserRole, user_id: i64) -> TestServer {
        let service = Arc::new(VendorService::new(Arc::new(store.clone())));
        TestServer::new(with_auth(routes(service), authenticated_user(user_id, role))).unwrap()
    }

    #[tokio::test]
    async fn test_admin_saves_and_lists_vendors() {
        let store = InMemoryStore::new();
        let server = server(&store, UserRole::Admin, 1);

        server
            .post("/admin/vendor/save")
            .json(&json!({
                "username": "hillside",
                "password": "vendor-pass",
                "businessName": "Hillside Stays",
                "email": "hello@hillside.lk"
            }))
            .await
            .assert_status_ok();

        let response = server.get("/admin/vendor/all").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["businessName"], "Hillside Stays");
    }

    #[tokio::test]
    async fn test_vendor_cannot_use_admin_routes() {
        let store = InMemoryStore::new();
        let server = server(&store, UserRole::Vendor, 1);

        server
            .get("/admin/vendor/all")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_username_is_rejected() {
        let store = InMemoryStore::new();
        let server = server(&store, UserRole::Admin, 1);

        server
            .post("/admin/vendor/save")
            .json(&json!({
                "username": "9 lives",
                "password": "vendor-pass",
                "businessName": "Hillside Stays",
                "email": "hello@hillside.lk"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(store.account_count(), 0);
    }
}
