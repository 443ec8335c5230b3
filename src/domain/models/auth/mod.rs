pub mod authenticated_user;
pub mod password;

pub use authenticated_user::AuthenticatedUser;
pub use password::Password;
