//! UI Components

pub mod image_drop;
pub mod navbar;
pub mod toast;
pub mod wallet_button;

pub use image_drop::ImageDropzone;
pub use navbar::Navbar;
pub use toast::{provide_toast_context, use_toast, ToastAction, ToastHost};
pub use wallet_button::WalletConnectionButton;
