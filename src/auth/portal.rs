//! # Login Portal
//!
//! The portal is the external credential backend: it verifies credentials and, on
//! success, hands back an avatar (the authenticated view of the protected resource
//! tree) together with a logout callback to run once rendering for that login has
//! completed. The portal login is the only suspension point in the negotiation; it
//! completes exactly once, with either a session or an error.
//!
//! [`LoginOutcome::classify`] is the single place login failures are triaged. Callers
//! never see raw portal errors: expected failures become a challenge, unexpected ones
//! become a logged 500.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::auth::credentials::Credentials;
use crate::core::error::{AuthError, AuthResult};
use crate::core::types::Resource;

/// Cleanup hook invoked once per successful login, at end of the rendering that
/// consumed it.
pub type Logout = Arc<dyn Fn() + Send + Sync>;

/// Extra per-request context handed to the portal alongside the credentials. The
/// gateway always passes `None`; it exists for portal implementations that want
/// host-supplied context.
pub type Mind = Option<serde_json::Value>;

/// The capability a caller requests from the portal for the avatar it is about to
/// receive. The gateway always asks for [`AvatarInterface::Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarInterface {
    /// A renderable, dispatchable resource tree.
    Resource,
}

/// A successful login: the granted interface, the avatar, and its logout callback.
#[derive(Clone)]
pub struct AvatarSession {
    /// The interface the portal granted; echoes the requested capability.
    pub interface: AvatarInterface,

    /// The authenticated view of the protected resource tree.
    pub avatar: Arc<dyn Resource>,

    /// Cleanup hook for this login.
    pub logout: Logout,
}

impl AvatarSession {
    /// Create a session granting a resource avatar.
    pub fn new(interface: AvatarInterface, avatar: Arc<dyn Resource>, logout: Logout) -> Self {
        Self {
            interface,
            avatar,
            logout,
        }
    }
}

impl fmt::Debug for AvatarSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvatarSession")
            .field("interface", &self.interface)
            .finish_non_exhaustive()
    }
}

/// The login backend.
#[async_trait]
pub trait Portal: Send + Sync {
    /// Attempt a login with the given credentials, requesting an avatar supporting
    /// `interface`.
    ///
    /// Denied or failed logins must fail with [`AuthError::Unauthorized`] or
    /// [`AuthError::LoginFailed`]; any other error is treated as an internal fault.
    async fn login(
        &self,
        credentials: Box<dyn Credentials>,
        mind: Mind,
        interface: AvatarInterface,
    ) -> AuthResult<AvatarSession>;
}

/// The classified result of a single login attempt.
///
/// Exactly one outcome is produced per attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The portal granted an avatar.
    Success(AvatarSession),
    /// An expected authentication failure; answered with a challenge.
    ExpectedFailure(AuthError),
    /// Anything else; logged and answered with a generic server error.
    UnexpectedFailure(AuthError),
}

impl LoginOutcome {
    /// Triage a raw portal result into an outcome.
    pub fn classify(result: AuthResult<AvatarSession>) -> Self {
        match result {
            Ok(session) => Self::Success(session),
            Err(err) if err.is_expected() => Self::ExpectedFailure(err),
            Err(err) => Self::UnexpectedFailure(err),
        }
    }
}
