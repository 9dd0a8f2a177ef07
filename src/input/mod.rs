//! Terminal input layer.

pub mod handler;

pub use handler::{handle_key_event, should_quit};
