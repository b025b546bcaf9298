//! Application state

pub mod token_form;
pub mod wallet;
