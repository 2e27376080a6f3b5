mod public_user;

pub use public_user::{Gender, NewPublicUser, PublicUser, PublicUserUpdate};
