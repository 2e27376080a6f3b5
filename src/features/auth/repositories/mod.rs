//! Login account persistence.

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::auth::model::{UserAccount, UserDetailsClaim, UserRole, UserStatus};

pub use postgres::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserAccount>>;

    async fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserAccount>;

    /// Name and email from the account's profile, when it has one
    async fn find_user_details(&self, account: &UserAccount) -> Result<Option<UserDetailsClaim>>;
}
