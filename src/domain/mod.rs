mod field_error;
mod login_credentials;
mod new_user;
mod person_name;
mod user;
mod user_email;
mod user_password;

pub use field_error::{FieldError, ValidationErrors};
pub use login_credentials::LoginCredentials;
pub use new_user::NewUser;
pub use person_name::PersonName;
pub use user::{FullName, User, UserId};
pub use user_email::UserEmail;
pub use user_password::UserPassword;
