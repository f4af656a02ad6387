//! Output formats backed by crates outside the library.

pub mod cbor;
pub mod toml;
pub mod yaml;
