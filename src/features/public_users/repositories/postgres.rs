use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{PublicUserRepository, PublicUserUnitOfWork};
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{UserAccount, UserRole, UserStatus};
use crate::features::public_users::models::{NewPublicUser, PublicUser, PublicUserUpdate};

const PUBLIC_USER_COLUMNS: &str = "id, account_id, first_name, last_name, email, mobile, birthday, \
     gender, nationality, country, address, town, zipcode, verification_code, \
     verification_expires_at, created_at, updated_at";

pub struct PgPublicUserRepository {
    pool: PgPool,
}

impl PgPublicUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PublicUserRepository for PgPublicUserRepository {
    async fn begin(&self) -> Result<Box<dyn PublicUserUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;
        Ok(Box::new(PgPublicUserUnitOfWork { tx }))
    }

    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<PublicUser>> {
        sqlx::query_as::<_, PublicUser>(&format!(
            "SELECT {} FROM public_users WHERE account_id = $1",
            PUBLIC_USER_COLUMNS
        ))
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch public user of account {}: {:?}", account_id, e);
            AppError::Database(e)
        })
    }

    async fn update_details(
        &self,
        account_id: i64,
        update: &PublicUserUpdate,
    ) -> Result<Option<PublicUser>> {
        sqlx::query_as::<_, PublicUser>(&format!(
            r#"
            UPDATE public_users
            SET first_name = $2, last_name = $3, mobile = $4, birthday = $5, gender = $6,
                nationality = $7, country = $8, address = $9, town = $10, zipcode = $11
            WHERE account_id = $1
            RETURNING {}
            "#,
            PUBLIC_USER_COLUMNS
        ))
        .bind(account_id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.mobile)
        .bind(update.birthday)
        .bind(update.gender)
        .bind(&update.nationality)
        .bind(&update.country)
        .bind(&update.address)
        .bind(&update.town)
        .bind(&update.zipcode)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update public user of account {}: {:?}", account_id, e);
            AppError::Database(e)
        })
    }
}

pub struct PgPublicUserUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl PublicUserUnitOfWork for PgPublicUserUnitOfWork {
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

    async fn email_taken(&mut self, email: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM public_users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check public user email: {:?}", e);
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
        .map_err(|e| AppError::from_write(e, "There is an existing user for given email!"))
    }

    async fn insert_profile(&mut self, profile: &NewPublicUser) -> Result<PublicUser> {
        sqlx::query_as::<_, PublicUser>(&format!(
            r#"
            INSERT INTO public_users
                (account_id, first_name, last_name, email, mobile, verification_code, verification_expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PUBLIC_USER_COLUMNS
        ))
        .bind(profile.account_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.mobile)
        .bind(&profile.verification_code)
        .bind(profile.verification_expires_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_write(e, "There is an existing user for given email!"))
    }

    async fn lock_by_email(&mut self, email: &str) -> Result<Option<PublicUser>> {
        sqlx::query_as::<_, PublicUser>(&format!(
            "SELECT {} FROM public_users WHERE LOWER(email) = LOWER($1) FOR UPDATE",
            PUBLIC_USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to lock public user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn set_account_status(&mut self, account_id: i64, status: UserStatus) -> Result<()> {
        sqlx::query("UPDATE user_accounts SET status = $2 WHERE id = $1")
            .bind(account_id)
            .bind(status)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update status of account {}: {:?}", account_id, e);
                AppError::Database(e)
            })?;
        Ok(())
    }

    async fn clear_verification(&mut self, public_user_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE public_users
            SET verification_code = NULL, verification_expires_at = NULL
            WHERE id = $1
            "#,
        )
        .bind(public_user_id)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to clear verification of public user {}: {:?}", public_user_id, e);
            AppError::Database(e)
        })?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit transaction: {:?}", e);
            AppError::Database(e)
        })
    }
}
