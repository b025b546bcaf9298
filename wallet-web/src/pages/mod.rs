//! Page modules

pub mod token_create;

pub use token_create::TokenCreatePage;
