//! Vendor persistence.

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::auth::model::{UserAccount, UserRole, UserStatus};
use crate::features::vendors::models::{NewVendor, Vendor};

pub use postgres::PgVendorRepository;

/// Vendor profile joined with its account's login name and status
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VendorWithAccount {
    #[sqlx(flatten)]
    pub vendor: Vendor,
    pub username: String,
    pub status: UserStatus,
}

#[async_trait]
pub trait VendorRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn VendorUnitOfWork>>;

    async fn find_all(&self) -> Result<Vec<VendorWithAccount>>;

    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<VendorWithAccount>>;
}

/// Account plus profile creation in one transaction
#[async_trait]
pub trait VendorUnitOfWork: Send {
    async fn username_taken(&mut self, username: &str) -> Result<bool>;

    async fn insert_account(
        &mut self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserAccount>;

    async fn insert_vendor(&mut self, vendor: &NewVendor) -> Result<Vendor>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
