use async_trait::async_trait;
use sqlx::PgPool;

use super::UserRepository;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{UserAccount, UserDetailsClaim, UserRole, UserStatus};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, username, password_hash, role, status, created_at, updated_at
            FROM user_accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch account by username: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserAccount>> {
        sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, username, password_hash, role, status, created_at, updated_at
            FROM user_accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch account {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserAccount> {
        sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO user_accounts (username, password_hash, role, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role, status, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "There is an existing user for given username!"))
    }

    async fn find_user_details(&self, account: &UserAccount) -> Result<Option<UserDetailsClaim>> {
        let details = match account.role {
            UserRole::PublicUser => sqlx::query_as::<_, (String, String, String)>(
                "SELECT first_name, last_name, email FROM public_users WHERE account_id = $1",
            )
            .bind(account.id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| {
                row.map(|(first_name, last_name, email)| UserDetailsClaim {
                    first_name: Some(first_name),
                    last_name: Some(last_name),
                    email: Some(email),
                })
            }),
            UserRole::Vendor => sqlx::query_scalar::<_, String>(
                "SELECT email FROM vendors WHERE account_id = $1",
            )
            .bind(account.id)
            .fetch_optional(&self.pool)
            .await
            .map(|email| {
                email.map(|email| UserDetailsClaim {
                    first_name: None,
                    last_name: None,
                    email: Some(email),
                })
            }),
            UserRole::Admin => Ok(None),
        };

        details.map_err(|e| {
            tracing::error!("Failed to load details of account {}: {:?}", account.id, e);
            AppError::Database(e)
        })
    }
}
