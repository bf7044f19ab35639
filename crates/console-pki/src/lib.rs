//! Certificate bindings for console workspaces.
#![forbid(unsafe_code)]
//!
//! A workspace's technical account authenticates with X.509 certificates.
//! This crate identifies certificates by fingerprint and keeps a
//! workspace's bindings free of duplicates.
//!
//! # Overview
//!
//! - [`fingerprint`] computes the SHA-1 fingerprint of a PEM or DER
//!   certificate, matching `openssl x509 -fingerprint -sha1` without colons
//! - [`BindingReconciler`] uploads a certificate only when no binding with
//!   the same fingerprint exists, and deletes bindings by id or fingerprint
//! - [`BindingClient`] is the remote seam the reconciler drives
//!
//! # Example
//!
//! ```
//! let cert = rcgen::generate_simple_self_signed(vec!["node.example".to_string()]).unwrap();
//!
//! let from_pem = console_pki::fingerprint(cert.cert.pem().as_bytes()).unwrap();
//! let from_der = console_pki::fingerprint(cert.cert.der()).unwrap();
//! assert_eq!(from_pem, from_der);
//! assert_eq!(from_pem.len(), 40);
//! ```

mod binding;
mod certificate;
mod client;
mod error;
mod reconcile;

pub use binding::CertificateBinding;
pub use certificate::{fingerprint, Certificate};
pub use client::BindingClient;
pub use error::{Error, Result};
pub use reconcile::BindingReconciler;
