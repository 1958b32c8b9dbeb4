//! Configuration management for tlsping.
//!
//! Provides XDG-compliant settings and loading of custom trust roots.

mod roots;
mod settings;

pub use roots::load_ca_certs;
pub use settings::{AppSettings, Paths};
