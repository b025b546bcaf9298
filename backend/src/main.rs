//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.
//!
//! Configuration comes from the environment (or a `.env` file); see
//! `lib_core::config` for the variables.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    start_server(ServerConfig::default()).await
}
