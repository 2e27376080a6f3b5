mod public_user_service;
mod verification;

pub use public_user_service::PublicUserService;
pub use verification::{generate_verification_code, LoggingCodeSender, VerificationCodeSender};
