//! src/lib.rs
// make public to other binaries (main, test)
pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod user_store;
pub mod utils;
