//! RusTLS setup for PostgreSQL connections.

use std::sync::Arc;

use rustls::{crypto::aws_lc_rs, ClientConfig, RootCertStore};
use rustls_native_certs::load_native_certs;

use crate::common::*;

/// A RusTLS `ClientConfig` trusting the platform's native root certificates.
pub(crate) fn rustls_client_config() -> Result<ClientConfig> {
    let loaded = load_native_certs();
    for err in &loaded.errors {
        warn!("problem loading native certificates: {}", err);
    }
    let mut root_store = RootCertStore::empty();
    let (added, ignored) = root_store.add_parsable_certificates(loaded.certs);
    debug!(added, ignored, "loaded native root certificates");
    if root_store.is_empty() {
        return Err(format_err!(
            "no usable root certificates found (use sslmode=disable to connect without TLS)"
        ));
    }

    // Pick the provider explicitly, in case more than one is compiled in.
    let provider = Arc::new(aws_lc_rs::default_provider());
    Ok(ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .context("could not configure TLS protocol versions")?
        .with_root_certificates(root_store)
        .with_no_client_auth())
}
