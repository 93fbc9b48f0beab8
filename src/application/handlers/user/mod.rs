//! User application handlers.
//!
//! Account lifecycle: registration, sign-in, profile edits, avatars and
//! the admin login switch. Registration and avatar uploads are mirrored
//! to the remote service after commit.

mod avatar;
mod change_password;
mod list_users;
mod login_user;
mod profile;
mod register_user;
mod set_login_allowed;

pub use avatar::{GetAvatarHandler, UploadAvatarCommand, UploadAvatarHandler};
pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use list_users::{ListTicketUsersHandler, ListUsersHandler};
pub use login_user::{LoginResult, LoginUserCommand, LoginUserHandler};
pub use profile::{GetCurrentUserHandler, UpdateProfileCommand, UpdateProfileHandler};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use set_login_allowed::{SetLoginAllowedCommand, SetLoginAllowedHandler};
