//! X.509 certificates as uploaded to a workspace.

use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};
use x509_parser::pem::Pem;
use x509_parser::prelude::*;

use crate::error::{Error, Result};

const PEM_MARKER: &[u8] = b"-----BEGIN";
const PEM_LABEL: &str = "CERTIFICATE";

/// A DER-encoded X.509 certificate with the metadata shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
    subject: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
}

impl Certificate {
    /// Parses a certificate from PEM text or raw DER bytes.
    ///
    /// PEM may be wrapped at any width, use CRLF line endings and carry a
    /// trailing newline or not. In a bundle the first `CERTIFICATE` block
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CertificateFormat`] if no certificate can be read.
    pub fn from_pem_or_der(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.trim_ascii_start();
        if contains(bytes, PEM_MARKER) {
            let der = first_pem_certificate(bytes)?;
            Self::from_der(&der)
        } else {
            Self::from_der(bytes)
        }
    }

    /// Parses a certificate from DER bytes. Anything after the certificate
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CertificateFormat`] if parsing fails.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (rest, cert) = X509Certificate::from_der(der)
            .map_err(|e| Error::CertificateFormat(format!("failed to parse certificate: {e}")))?;

        let not_before = DateTime::from_timestamp(cert.validity().not_before.timestamp(), 0)
            .ok_or_else(|| Error::CertificateFormat("invalid not_before timestamp".into()))?;
        let not_after = DateTime::from_timestamp(cert.validity().not_after.timestamp(), 0)
            .ok_or_else(|| Error::CertificateFormat("invalid not_after timestamp".into()))?;
        let subject = cert.subject().to_string();

        Ok(Self {
            der: der[..der.len() - rest.len()].to_vec(),
            subject,
            not_before,
            not_after,
        })
    }

    /// Returns the DER-encoded certificate bytes.
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Returns the PEM-encoded certificate.
    #[must_use]
    pub fn pem(&self) -> String {
        use base64::Engine;
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.der);
        format!(
            "-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----\n",
            b64.as_bytes()
                .chunks(64)
                .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
                .collect::<Vec<_>>()
                .join("\n")
        )
    }

    /// Returns the subject distinguished name.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the certificate validity start time.
    #[must_use]
    pub const fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    /// Returns the certificate validity end time.
    #[must_use]
    pub const fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// SHA-1 over the DER encoding as lowercase hex without separators,
    /// the form `openssl x509 -fingerprint -sha1` prints minus colons.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha1::digest(&self.der))
    }
}

/// Computes the fingerprint of a PEM or DER certificate.
///
/// # Errors
///
/// Returns [`Error::CertificateFormat`] if `bytes` is not a certificate.
pub fn fingerprint(bytes: &[u8]) -> Result<String> {
    Certificate::from_pem_or_der(bytes).map(|cert| cert.fingerprint())
}

fn first_pem_certificate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut last_error = None;
    for block in Pem::iter_from_buffer(bytes) {
        match block {
            Ok(pem) if pem.label == PEM_LABEL => return Ok(pem.contents),
            Ok(_) => {}
            Err(e) => last_error = Some(e.to_string()),
        }
    }
    Err(Error::CertificateFormat(last_error.map_or_else(
        || "no CERTIFICATE block found".to_string(),
        |e| format!("malformed PEM: {e}"),
    )))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
