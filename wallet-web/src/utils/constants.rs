//! Application constants

pub const API_BASE: &str = "http://127.0.0.1:3001";

/// Accept attribute for the icon file input
pub const IMAGE_ACCEPT: &str = "image/jpeg,image/png,image/webp";

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u32 = 5000;
