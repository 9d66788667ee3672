// Library exports for testing
// The binary (main.rs) imports these as well

pub mod error;
pub mod logger;
pub mod routes;
pub mod server;
pub mod settings;
pub mod state;
