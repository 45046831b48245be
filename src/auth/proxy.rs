//! # Authenticated Resource Proxy
//!
//! [`ResourceWrapper`] wraps the avatar returned by a successful login so that the
//! login's logout callback runs when rendering completes, however deep dispatch
//! descends before a leaf is finally rendered. Each child lookup produces a fresh
//! wrapper around the child, sharing the same logout reference; only the render call
//! that actually happens registers the completion hook that invokes logout.

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::portal::{AvatarSession, Logout};
use crate::core::types::{HttpResponse, RequestContext, Resource};

/// Delegating wrapper that ties an avatar subtree to its login's logout callback.
///
/// An assumption is made here that exactly one resource from among the avatar and
/// all of its children will be rendered per login. If more than one is rendered,
/// logout is invoked multiple times and probably earlier than desired.
pub struct ResourceWrapper {
    resource: Arc<dyn Resource>,
    logout: Logout,
}

impl ResourceWrapper {
    /// Wrap the avatar of a successful login.
    pub fn new(session: AvatarSession) -> Self {
        Self {
            resource: session.avatar,
            logout: session.logout,
        }
    }
}

#[async_trait]
impl Resource for ResourceWrapper {
    /// Hook into response completion so that when rendering has finished, logout
    /// is called.
    async fn render(&self, request: &mut RequestContext) -> HttpResponse {
        let logout = Arc::clone(&self.logout);
        request.notify_finish(move || logout());
        self.resource.render(request).await
    }

    /// Pass the lookup through to the wrapped resource, re-wrapping the result so
    /// logout still runs when the child's rendering completes.
    async fn get_child_with_default(
        self: Arc<Self>,
        name: &str,
        request: &mut RequestContext,
    ) -> Arc<dyn Resource> {
        let child = Arc::clone(&self.resource)
            .get_child_with_default(name, request)
            .await;
        Arc::new(Self {
            resource: child,
            logout: Arc::clone(&self.logout),
        })
    }
}
