mod health_check;
mod home;
pub mod users;

pub use health_check::*;
pub use home::*;
pub use users::*;
