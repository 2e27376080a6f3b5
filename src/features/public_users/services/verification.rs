use async_trait::async_trait;
use rand::Rng;

use crate::core::error::Result;

/// Delivers registration verification codes to their owner
#[async_trait]
pub trait VerificationCodeSender: Send + Sync {
    async fn send_code(&self, email: &str, code: &str) -> Result<()>;
}

/// Writes codes to the application log; used until a mail transport is configured
pub struct LoggingCodeSender;

#[async_trait]
impl VerificationCodeSender for LoggingCodeSender {
    async fn send_code(&self, email: &str, code: &str) -> Result<()> {
        tracing::info!("Verification code for {}: {}", email, code);
        Ok(())
    }
}

/// Six decimal digits, uniformly drawn from the thread-local CSPRNG
pub fn generate_verification_code() -> String {
    format!("{:06}", rand::rng().random_range(0..1_000_000u32))
}
