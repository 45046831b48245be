//! # Auth Gateway Library - Core Library Crate
//!
//! An HTTP header-based authentication guard for composable resource trees. The
//! gateway sits in front of a portal-protected resource tree and, for every incoming
//! request, negotiates authentication: it selects among the configured authentication
//! schemes, decodes scheme-specific credentials out of the `Authorization` header,
//! drives an asynchronous login against a pluggable backend, and either forwards
//! dispatch to the protected resource or answers with a challenge or error page.
//!
//! ## Overview
//!
//! - [`HttpAuthSessionWrapper`] is the entry point: a [`Resource`] placed at the root
//!   of the protected subtree.
//! - [`CredentialFactory`] implementations plug in one authentication scheme each;
//!   their order fixes challenge emission and scheme selection.
//! - [`Portal`] is the credential backend; successful logins yield an avatar resource
//!   and a logout callback the gateway fires once rendering completes.
//! - [`UnauthorizedResource`] and [`ErrorPage`] are the terminal responses for failed
//!   negotiation.
//!
//! If no `Authorization` header is supplied, an anonymous login is attempted with the
//! [`Anonymous`] credentials marker. If such a header is supplied and does not contain
//! allowed credentials, or if anonymous login is denied, a 401 is sent in the response
//! along with `WWW-Authenticate` headers for each of the allowed schemes.

/// Core functionality: error types, the resource/request/response model, and
/// generic error pages.
pub mod core;

/// Authentication negotiation: session wrapper, credential factories, portal
/// contract, challenge responder, and the logout-wrapping resource proxy.
pub mod auth;

/// Observability: `tracing` subscriber setup for embedding hosts.
pub mod observability;

// Re-export commonly used types so hosts can import them from the crate root.

/// Main error type and result alias used throughout the gateway.
pub use crate::core::error::{AuthError, AuthResult};

/// The resource protocol and the per-request exchange types.
pub use crate::core::types::{HttpResponse, RequestContext, Resource};

/// Generic error pages, used by the gateway for the unexpected-failure path.
pub use crate::core::error_pages::{ErrorPage, ErrorPageConfig, ErrorPageGenerator};

/// The authentication entry point and its collaborator contracts.
pub use crate::auth::{
    Anonymous, AvatarInterface, AvatarSession, CredentialFactory, Credentials,
    HttpAuthSessionWrapper, LoginOutcome, Logout, Mind, Portal, ResourceWrapper,
    UnauthorizedResource,
};

/// Logging setup for embedding hosts.
pub use crate::observability::{init_logging, LogConfig, LogFormat};
