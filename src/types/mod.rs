//! Core type definitions for addresses and resolved targets.

mod address;
mod target;

pub use address::{HostPort, DEFAULT_HOST};
pub use target::ResolvedTarget;
