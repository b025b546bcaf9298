//! # Web Library
//!
//! HTTP handlers, middleware, services and server setup for the token creation API.
//!
//! ## Endpoints
//!
//! ```bash
//! # Prepare a mint transaction (multipart form)
//! curl -X POST http://localhost:3001/api/token/prepare -F owner=<pubkey> -F name=Gold ... -F image=@gold.png
//!
//! # Submit the wallet-signed transaction
//! curl -X POST http://localhost:3001/api/token/submit \
//!   -H 'Content-Type: application/json' \
//!   -d '{"transaction":"<base64>","mint_address":"<mint>"}'
//!
//! # Health check
//! curl http://localhost:3001/health
//! ```

pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

pub use server::{create_router, start_server, AppState, ServerConfig};
