//! # Credentials and Credential Factories
//!
//! A credential factory owns one authentication scheme: it knows how to issue that
//! scheme's challenge parameters and how to decode the scheme-specific portion of an
//! `Authorization` header into credentials the login backend can verify. Factories are
//! stateless per request and shared read-only across requests; the gateway holds them
//! as an ordered list where order determines both challenge emission order and
//! first-match-wins scheme selection.
//!
//! Credentials themselves are opaque to the gateway: it passes whatever a factory
//! produced straight to the portal, which downcasts to the concrete type it expects.

use async_trait::async_trait;
use std::any::Any;
use std::fmt;

use crate::core::error::AuthResult;
use crate::core::types::RequestContext;

/// Opaque credentials produced by a factory's decode step.
///
/// The gateway never inspects credentials; portals downcast via [`Credentials::as_any`]
/// to the concrete types produced by the factories they were configured with.
pub trait Credentials: Any + Send + Sync + fmt::Debug {
    /// Access to the concrete credential type for portal-side downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// The zero-information credentials used when a request carries no `Authorization`
/// header. Portals that permit guest access grant an avatar for these; all others
/// deny them like any bad credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl Credentials for Anonymous {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A pluggable handler for one authentication scheme.
#[async_trait]
pub trait CredentialFactory: Send + Sync {
    /// The scheme identifier, e.g. `basic`. Compared case-insensitively against the
    /// scheme token of incoming `Authorization` headers.
    fn scheme(&self) -> &str;

    /// Produce the challenge parameters for this scheme, in emission order.
    ///
    /// The pairs end up quoted in a `WWW-Authenticate` header, so values may contain
    /// any characters; quoting is handled by the challenge responder.
    fn get_challenge(&self, request: &RequestContext) -> Vec<(String, String)>;

    /// Decode the scheme-specific payload (the header value after the scheme token)
    /// into credentials.
    ///
    /// Malformed or rejected payloads must fail with [`AuthError::LoginFailed`]; any
    /// other error is treated as an internal fault and surfaced as a server error
    /// rather than a challenge.
    ///
    /// [`AuthError::LoginFailed`]: crate::core::error::AuthError::LoginFailed
    async fn decode(
        &self,
        payload: &str,
        request: &RequestContext,
    ) -> AuthResult<Box<dyn Credentials>>;
}
