//! Browser-side services: wallet interop and the backend API.

pub mod api;
pub mod wallet;
