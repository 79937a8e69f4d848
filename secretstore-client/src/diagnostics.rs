//! Failure diagnostics
//!
//! Facades report failures to an injected [`Diagnostics`] sink before returning
//! the error. The sink only observes: it never changes which error is returned.

use std::sync::Arc;

use tracing::{error, warn};

use crate::{
    error::ClientError,
    transport::{HttpRequest, HttpResponse},
};

/// Observer of failed calls
pub trait Diagnostics: Send + Sync {
    /// A Secret Store node answered with a non-200 status
    fn http_failure(&self, request: &HttpRequest, response: &HttpResponse);

    /// Any call failed; `endpoint` is the RPC method or session path
    fn error(&self, endpoint: &str, error: &ClientError);
}

/// Discards everything; the default for every facade
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    fn http_failure(&self, _request: &HttpRequest, _response: &HttpResponse) {}

    fn error(&self, _endpoint: &str, _error: &ClientError) {}
}

/// Writes failures to the `secretstore` tracing target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn http_failure(&self, request: &HttpRequest, response: &HttpResponse) {
        warn!(
            target: "secretstore",
            status_code = response.status.as_u16(),
            status_message = response.status_message(),
            body = %response.body,
            method = %request.method,
            url = %request.url,
            request_body = ?request.body,
            "secret store session failed"
        );
    }

    fn error(&self, endpoint: &str, error: &ClientError) {
        error!(target: "secretstore", endpoint, "{}", error);
    }
}

/// Sink for a plain on/off verbose setting
///
/// `true` logs failures through `tracing`, `false` discards them.
pub fn from_verbose(verbose: bool) -> Arc<dyn Diagnostics> {
    if verbose {
        Arc::new(TracingDiagnostics)
    } else {
        Arc::new(Silent)
    }
}
