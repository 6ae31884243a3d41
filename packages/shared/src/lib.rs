//! Utilities shared by the Hubbub server and client binaries.

pub mod logger;
pub mod time;
