//! # Challenge Responder
//!
//! [`UnauthorizedResource`] is the terminal resource returned whenever a request could
//! not be authenticated: it renders a 401 carrying one `WWW-Authenticate` header per
//! configured credential factory, in configuration order, and absorbs any further
//! child lookup so that nested dispatch cannot escape the unauthorized state.

use http::header::WWW_AUTHENTICATE;
use http::StatusCode;
use std::sync::Arc;
use tracing::warn;

use async_trait::async_trait;

use crate::auth::credentials::CredentialFactory;
use crate::core::types::{HttpResponse, RequestContext, Resource};

/// Quote a challenge parameter value: escape backslash, then double-quote, then wrap
/// in double quotes.
fn quote_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Format one `WWW-Authenticate` header value:
/// `<scheme> <key1>="<value1>", <key2>="<value2>"`.
fn generate_www_authenticate(scheme: &str, challenge: &[(String, String)]) -> String {
    let params: Vec<String> = challenge
        .iter()
        .map(|(key, value)| format!("{}={}", key, quote_string(value)))
        .collect();
    format!("{} {}", scheme, params.join(", "))
}

/// Terminal resource answering every request with a 401 challenge.
pub struct UnauthorizedResource {
    credential_factories: Vec<Arc<dyn CredentialFactory>>,
}

impl UnauthorizedResource {
    /// Create a challenge responder for the given ordered factory list.
    pub fn new(credential_factories: Vec<Arc<dyn CredentialFactory>>) -> Self {
        Self {
            credential_factories,
        }
    }
}

#[async_trait]
impl Resource for UnauthorizedResource {
    /// Send `WWW-Authenticate` headers to the client, one per factory, in factory
    /// order. Factories sharing a scheme each contribute their own header line.
    async fn render(&self, request: &mut RequestContext) -> HttpResponse {
        let mut response = HttpResponse::text(StatusCode::UNAUTHORIZED, "Unauthorized");
        for factory in &self.credential_factories {
            let challenge = factory.get_challenge(request);
            let value = generate_www_authenticate(factory.scheme(), &challenge);
            if !response.append_header(WWW_AUTHENTICATE, &value) {
                warn!(
                    request_id = %request.id,
                    scheme = factory.scheme(),
                    "challenge contained bytes not legal in a header, skipping"
                );
            }
        }
        response
    }

    /// Disable resource dispatch: every child lookup resolves to this instance.
    async fn get_child_with_default(
        self: Arc<Self>,
        _name: &str,
        _request: &mut RequestContext,
    ) -> Arc<dyn Resource> {
        self
    }
}
