use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{VendorRepository, VendorUnitOfWork, VendorWithAccount};
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{UserAccount, UserRole, UserStatus};
use crate::features::vendors::models::{NewVendor, Vendor};

const VENDOR_WITH_ACCOUNT: &str = r#"
    SELECT v.id, v.account_id, v.business_name, v.email, v.telephone, v.address,
           v.created_at, v.updated_at, a.username, a.status
    FROM vendors v
    JOIN user_accounts a ON a.id = v.account_id
"#;

pub struct PgVendorRepository {
    pool: PgPool,
}

impl PgVendorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VendorRepository for PgVendorRepository {
    async fn begin(&self) -> Result<Box<dyn VendorUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;
        Ok(Box::new(PgVendorUnitOfWork { tx }))
    }

    async fn find_all(&self) -> Result<Vec<VendorWithAccount>> {
        sqlx::query_as::<_, VendorWithAccount>(&format!(
            "{} ORDER BY v.business_name ASC",
            VENDOR_WITH_ACCOUNT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch vendors: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<VendorWithAccount>> {
        sqlx::query_as::<_, VendorWithAccount>(&format!(
            "{} WHERE v.account_id = $1",
            VENDOR_WITH_ACCOUNT
        ))
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch vendor of account {}: {:?}", account_id, e);
            AppError::Database(e)
        })
    }
}

pub struct PgVendorUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl VendorUnitOfWork for PgVendorUnitOfWork {
    async fn username_taken(&mut self, username: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_accounts WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check username: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert_account(
        &mut self,
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
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_write(e, "There is an existing user for given username!"))
    }

    async fn insert_vendor(&mut self, vendor: &NewVendor) -> Result<Vendor> {
        sqlx::query_as::<_, Vendor>(
            r#"
            INSERT INTO vendors (account_id, business_name, email, telephone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, account_id, business_name, email, telephone, address, created_at, updated_at
            "#,
        )
        .bind(vendor.account_id)
        .bind(&vendor.business_name)
        .bind(&vendor.email)
        .bind(&vendor.telephone)
        .bind(&vendor.address)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_write(e, "Vendor profile already exists for this account"))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit transaction: {:?}", e);
            AppError::Database(e)
        })
    }
}
