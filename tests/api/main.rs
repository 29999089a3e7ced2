mod health_check;
mod helpers;
mod login;
mod store_failure;
