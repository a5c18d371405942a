//! JsonConfig command-line support
//!
//! Helpers behind the `jsonconfig` binary, exposed as a library for testing.

pub mod commands;
pub mod keys;

pub use commands::{Command, run};
pub use keys::{KeyError, get_key, parse_value, set_key};
