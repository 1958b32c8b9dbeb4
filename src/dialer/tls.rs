//! TLS dial strategy.
//!
//! Establishes a TCP connection and then completes a rustls handshake
//! over it. Certificate verification uses either the caller's trust roots
//! or the bundled Mozilla root set, and can be disabled entirely.

use crate::dialer::tcp;
use crate::dialer::traits::{ConnectionMode, Dialer};
use crate::error::{self, PingError};
use crate::types::ResolvedTarget;
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::time::{timeout_at, Instant};
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::crypto::{
    ring, verify_tls12_signature, verify_tls13_signature, CryptoProvider,
};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{
    self, ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme,
};
use tokio_rustls::TlsConnector;

/// Measures the TCP handshake plus the TLS handshake.
///
/// The rustls client configuration is built once and shared by every
/// attempt; each attempt gets its own TCP stream and TLS session.
pub struct TlsDialer {
    target: SocketAddr,
    server_name: ServerName<'static>,
    connector: TlsConnector,
    timeout: Duration,
}

impl TlsDialer {
    /// Create a new TLS dialer for `target`.
    ///
    /// # Arguments
    /// * `target` - Resolved target; its host name is sent as SNI
    /// * `timeout` - Limit for the TCP connect and handshake together
    /// * `insecure_skip_verify` - Accept any server certificate
    /// * `roots` - Trust roots; the bundled Mozilla roots when `None`
    pub fn new(
        target: &ResolvedTarget,
        timeout: Duration,
        insecure_skip_verify: bool,
        roots: Option<Arc<RootCertStore>>,
    ) -> error::Result<Self> {
        let addr = target.socket_addr();
        let handshake_error = |source: io::Error| PingError::TlsHandshake {
            target: addr,
            source,
        };

        let server_name = ServerName::try_from(target.host.clone())
            .map_err(|e| handshake_error(io::Error::new(io::ErrorKind::InvalidInput, e)))?;

        let config = client_config(insecure_skip_verify, roots)
            .map_err(|e| handshake_error(io::Error::other(e)))?;

        Ok(Self {
            target: addr,
            server_name,
            connector: TlsConnector::from(config),
            timeout,
        })
    }
}

#[async_trait]
impl Dialer for TlsDialer {
    async fn connect_and_close(&self) -> error::Result<()> {
        let deadline = Instant::now() + self.timeout;
        let stream = tcp::connect(self.target, self.timeout).await?;

        let handshake = self.connector.connect(self.server_name.clone(), stream);
        let mut tls = match timeout_at(deadline, handshake).await {
            Ok(Ok(tls)) => tls,
            Ok(Err(source)) => {
                return Err(PingError::TlsHandshake {
                    target: self.target,
                    source,
                })
            }
            Err(_) => {
                return Err(PingError::TlsHandshake {
                    target: self.target,
                    source: io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("timed out after {:?}", self.timeout),
                    ),
                })
            }
        };

        // close_notify; the peer may already be gone.
        let _ = tls.shutdown().await;
        Ok(())
    }

    fn mode(&self) -> ConnectionMode {
        ConnectionMode::Tls
    }

    fn target(&self) -> SocketAddr {
        self.target
    }
}

/// Build the rustls client configuration for a run.
pub fn client_config(
    insecure_skip_verify: bool,
    roots: Option<Arc<RootCertStore>>,
) -> Result<Arc<ClientConfig>, rustls::Error> {
    let provider = Arc::new(ring::default_provider());
    let builder = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()?;

    let config = if insecure_skip_verify {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoCertificateVerification(provider)))
            .with_no_client_auth()
    } else {
        let roots = roots.unwrap_or_else(|| Arc::new(default_roots()));
        builder.with_root_certificates(roots).with_no_client_auth()
    };

    Ok(Arc::new(config))
}

/// The bundled Mozilla root certificates.
pub fn default_roots() -> RootCertStore {
    let mut store = RootCertStore::empty();
    store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    store
}

/// Accepts any certificate chain. Handshake signatures are still checked
/// so the session keys belong to whoever presented the certificate.
#[derive(Debug)]
struct NoCertificateVerification(Arc<CryptoProvider>);

impl ServerCertVerifier for NoCertificateVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    #[test]
    fn test_default_roots_not_empty() {
        assert!(!default_roots().is_empty());
    }

    #[test]
    fn test_client_config_variants() {
        assert!(client_config(false, None).is_ok());
        assert!(client_config(true, None).is_ok());
        assert!(client_config(false, Some(Arc::new(RootCertStore::empty()))).is_ok());
    }

    #[test]
    fn test_ip_host_is_valid_server_name() {
        let target = ResolvedTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST), 443);
        let dialer = TlsDialer::new(&target, Duration::from_secs(1), false, None).unwrap();
        assert_eq!(dialer.mode(), ConnectionMode::Tls);
        assert_eq!(dialer.target(), "127.0.0.1:443".parse().unwrap());
    }

    #[tokio::test]
    async fn test_handshake_with_plain_tcp_server_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hang up without speaking TLS.
            while let Ok((stream, _)) = listener.accept().await {
                drop(stream);
            }
        });

        let target = ResolvedTarget::new("localhost", addr.ip(), addr.port());
        let dialer = TlsDialer::new(&target, Duration::from_secs(2), true, None).unwrap();
        let err = dialer.connect_and_close().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TlsHandshake);
    }
}
