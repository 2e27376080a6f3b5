//! Public user profile persistence.

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::auth::model::{UserAccount, UserRole, UserStatus};
use crate::features::public_users::models::{NewPublicUser, PublicUser, PublicUserUpdate};

pub use postgres::PgPublicUserRepository;

#[async_trait]
pub trait PublicUserRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn PublicUserUnitOfWork>>;

    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<PublicUser>>;

    /// Replace the editable fields; `None` when the profile does not exist
    async fn update_details(
        &self,
        account_id: i64,
        update: &PublicUserUpdate,
    ) -> Result<Option<PublicUser>>;
}

/// Transaction-scoped registration and verification writes
#[async_trait]
pub trait PublicUserUnitOfWork: Send {
    async fn username_taken(&mut self, username: &str) -> Result<bool>;

    async fn email_taken(&mut self, email: &str) -> Result<bool>;

    async fn insert_account(
        &mut self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserAccount>;

    async fn insert_profile(&mut self, profile: &NewPublicUser) -> Result<PublicUser>;

    /// Lock the profile row with this email for the rest of the transaction
    async fn lock_by_email(&mut self, email: &str) -> Result<Option<PublicUser>>;

    async fn set_account_status(&mut self, account_id: i64, status: UserStatus) -> Result<()>;

    async fn clear_verification(&mut self, public_user_id: i64) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
