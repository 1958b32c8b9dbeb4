//! Loading trust roots from a PEM bundle.

use crate::error::{ConfigError, ConfigResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tokio_rustls::rustls::RootCertStore;

/// Read every certificate in the PEM file at `path` into a root store.
///
/// Fails if the file cannot be read, contains a malformed PEM block or a
/// certificate rustls rejects, or holds no certificates at all.
pub fn load_ca_certs(path: &Path) -> ConfigResult<RootCertStore> {
    let file = File::open(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let invalid = |reason: String| ConfigError::InvalidCertificate {
        path: path.to_path_buf(),
        reason,
    };

    let mut store = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut BufReader::new(file)) {
        let cert = cert.map_err(|e| invalid(e.to_string()))?;
        store.add(cert).map_err(|e| invalid(e.to_string()))?;
    }

    if store.is_empty() {
        return Err(ConfigError::NoCertificates(path.to_path_buf()));
    }
    Ok(store)
}
