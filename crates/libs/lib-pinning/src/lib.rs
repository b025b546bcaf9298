//! # Pinning Library
//!
//! Uploads token icons and metadata documents to the Pinata IPFS pinning API and
//! returns their public gateway URLs.
//!
//! The API JWT lives only in the server process; browsers never see it.

pub mod client;
pub mod error;
pub mod types;

pub use client::{PinataClient, PinningService};
pub use error::PinningError;
pub use types::{PinFile, PinataResponse, PinnedObject};
