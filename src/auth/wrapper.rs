//! # HTTP Authentication Session Wrapper
//!
//! [`HttpAuthSessionWrapper`] is the entry point of the gateway: a resource that sits
//! in front of a portal-protected tree and enforces header-based authentication
//! schemes on every request.
//!
//! If no `Authorization` header is supplied, an anonymous login is attempted with the
//! [`Anonymous`] credentials marker. If a header is supplied but no configured factory
//! matches its scheme, or its credentials are rejected, or anonymous login is denied,
//! the response is a 401 carrying `WWW-Authenticate` headers for each of the allowed
//! schemes. Unexpected failures anywhere along the way become a logged generic 500,
//! never a challenge.

use http::StatusCode;
use std::sync::Arc;
use tracing::error;

use async_trait::async_trait;

use crate::auth::challenge::UnauthorizedResource;
use crate::auth::credentials::{Anonymous, CredentialFactory, Credentials};
use crate::auth::portal::{AvatarInterface, LoginOutcome, Portal};
use crate::auth::proxy::ResourceWrapper;
use crate::core::error::AuthResult;
use crate::core::error_pages::{ErrorPage, ErrorPageConfig, ErrorPageGenerator};
use crate::core::types::{HttpResponse, RequestContext, Resource};

/// Resource wrapping a portal, enforcing supported header-based authentication
/// schemes.
///
/// Holds only immutable startup configuration: the portal reference, the ordered
/// credential factory list, and the error page generator. All per-request state lives
/// in the [`RequestContext`].
pub struct HttpAuthSessionWrapper {
    portal: Arc<dyn Portal>,
    credential_factories: Vec<Arc<dyn CredentialFactory>>,
    error_pages: Arc<ErrorPageGenerator>,
}

impl HttpAuthSessionWrapper {
    /// Create a session wrapper around `portal` with the given ordered factory list
    /// and default error pages.
    pub fn new(
        portal: Arc<dyn Portal>,
        credential_factories: Vec<Arc<dyn CredentialFactory>>,
    ) -> AuthResult<Self> {
        Self::with_error_pages(portal, credential_factories, ErrorPageConfig::default())
    }

    /// Create a session wrapper with a custom error page configuration.
    pub fn with_error_pages(
        portal: Arc<dyn Portal>,
        credential_factories: Vec<Arc<dyn CredentialFactory>>,
        error_pages: ErrorPageConfig,
    ) -> AuthResult<Self> {
        Ok(Self {
            portal,
            credential_factories,
            error_pages: Arc::new(ErrorPageGenerator::new(error_pages)?),
        })
    }

    fn unauthorized(&self) -> Arc<dyn Resource> {
        Arc::new(UnauthorizedResource::new(self.credential_factories.clone()))
    }

    fn server_error(&self) -> Arc<dyn Resource> {
        Arc::new(ErrorPage::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            Arc::clone(&self.error_pages),
        ))
    }

    /// Choose a credential factory suitable to decode the given `Authorization`
    /// header value.
    ///
    /// Splits on the first space and matches the scheme token case-insensitively
    /// against the configured factories, first match wins. Returns the factory and
    /// the remaining portion of the header value, or `None` when no factory can
    /// decode it.
    pub(crate) fn select_parse_header(
        &self,
        header: &str,
    ) -> Option<(Arc<dyn CredentialFactory>, String)> {
        let elements: Vec<&str> = header.split(' ').collect();
        let scheme = elements[0];
        self.credential_factories
            .iter()
            .find(|factory| factory.scheme().eq_ignore_ascii_case(scheme))
            .map(|factory| (Arc::clone(factory), elements[1..].join(" ")))
    }

    /// Get the resource avatar for the given credentials.
    ///
    /// This is where login outcomes are triaged: expected failures turn into a
    /// challenge responder, unexpected ones are logged and turn into a generic 500
    /// page. Raw portal errors never reach dispatch callers.
    async fn login(&self, credentials: Box<dyn Credentials>) -> Arc<dyn Resource> {
        let result = self
            .portal
            .login(credentials, None, AvatarInterface::Resource)
            .await;
        match LoginOutcome::classify(result) {
            LoginOutcome::Success(session) => Arc::new(ResourceWrapper::new(session)),
            LoginOutcome::ExpectedFailure(_) => self.unauthorized(),
            LoginOutcome::UnexpectedFailure(err) => {
                error!(error = %err, "portal login encountered unexpected error");
                self.server_error()
            }
        }
    }

    /// Get the resource the given request is authorized to receive.
    ///
    /// With proper authorization headers present, the resource is requested from the
    /// portal; without them, an anonymous login attempt is made.
    async fn authorized_resource(&self, request: &mut RequestContext) -> Arc<dyn Resource> {
        let header = request.header("authorization").map(str::to_owned);
        let Some(header) = header else {
            return self.login(Box::new(Anonymous)).await;
        };

        let Some((factory, payload)) = self.select_parse_header(&header) else {
            return self.unauthorized();
        };
        match factory.decode(&payload, request).await {
            Ok(credentials) => self.login(credentials).await,
            Err(err) if err.is_expected() => self.unauthorized(),
            Err(err) => {
                error!(
                    request_id = %request.id,
                    error = %err,
                    "unexpected failure from credentials factory"
                );
                self.server_error()
            }
        }
    }
}

#[async_trait]
impl Resource for HttpAuthSessionWrapper {
    /// Find the resource avatar suitable for the given request, if possible, and
    /// render it; otherwise render a challenge or an internal-error page.
    async fn render(&self, request: &mut RequestContext) -> HttpResponse {
        let resource = self.authorized_resource(request).await;
        resource.render(request).await
    }

    /// Resolve the authorized resource without consuming any path segment.
    ///
    /// The wrapper is transparent to dispatch: the segment the host just popped is
    /// pushed back so that whichever resource is selected governs subsequent segment
    /// consumption.
    async fn get_child_with_default(
        self: Arc<Self>,
        _name: &str,
        request: &mut RequestContext,
    ) -> Arc<dyn Resource> {
        if let Some(segment) = request.prepath.pop() {
            request.postpath.insert(0, segment);
        }
        self.authorized_resource(request).await
    }
}
