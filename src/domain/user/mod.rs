//! User module - accounts, profiles and avatars.

mod aggregate;
mod errors;

pub use aggregate::{
    validate_avatar, validate_email, validate_new_password, validate_password, validate_username,
    Avatar, ProfileChanges, User, MAX_AVATAR_BYTES,
};
pub use errors::UserError;
