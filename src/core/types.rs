//! # Core Types Module
//!
//! This module defines the foundational data structures and traits used throughout the
//! authentication gateway: the resource protocol that protected trees implement, the
//! request context threaded through dispatch, and the response type produced by rendering.
//!
//! ## Resource dispatch model
//!
//! A request is resolved against a tree of [`Resource`] values. The host transport pops
//! path segments from [`RequestContext::postpath`] onto [`RequestContext::prepath`] one at
//! a time, asking the current resource for the matching child, until the path is exhausted;
//! the resource it ends up with is rendered. Rendering returns an [`HttpResponse`]; once
//! the transport has finished writing it to the wire it calls [`RequestContext::finish`],
//! which fires any completion hooks registered during rendering.

use bytes::Bytes;
use http::header::{HeaderName, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use async_trait::async_trait;

/// The capability set every node in a dispatchable resource tree provides.
///
/// This is the explicit, object-safe rendering of a duck-typed resource protocol:
/// challenge pages, error pages, authenticated proxies and ordinary leaf resources all
/// implement it, so dispatch code never needs to know which of them it is holding.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Produce the response for this resource.
    ///
    /// Implementations may register completion hooks on the request via
    /// [`RequestContext::notify_finish`]; the transport fires them after the response
    /// has been fully written.
    async fn render(&self, request: &mut RequestContext) -> HttpResponse;

    /// Resolve the child matching `name`, or a fallback resource.
    ///
    /// The receiver is `Arc<Self>` so that terminal resources can return themselves,
    /// absorbing any further dispatch.
    async fn get_child_with_default(
        self: Arc<Self>,
        name: &str,
        request: &mut RequestContext,
    ) -> Arc<dyn Resource>;
}

type FinishHook = Box<dyn FnOnce() + Send>;

/// Per-request state threaded through resource dispatch.
///
/// One `RequestContext` exists per incoming request. It carries the request line and
/// headers, the path-segment cursor used by dispatch (`prepath` holds consumed segments,
/// `postpath` the remaining ones), and the registry of response-completion hooks.
pub struct RequestContext {
    /// Unique identifier for this request, used in log records.
    pub id: String,

    /// HTTP method.
    pub method: Method,

    /// Request URI including path and query parameters.
    pub uri: Uri,

    /// Request headers.
    pub headers: HeaderMap,

    /// Path segments already consumed by dispatch.
    pub prepath: Vec<String>,

    /// Path segments not yet consumed by dispatch.
    pub postpath: Vec<String>,

    finish_hooks: Mutex<Vec<FinishHook>>,
}

impl RequestContext {
    /// Create a request context with a generated id; `postpath` is seeded from the
    /// URI path segments.
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        let postpath = uri
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();
        Self {
            id: Uuid::new_v4().to_string(),
            method,
            uri,
            headers,
            prepath: Vec::new(),
            postpath,
            finish_hooks: Mutex::new(Vec::new()),
        }
    }

    /// Read a named header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Register a hook to run when the response has been completely written.
    pub fn notify_finish<F>(&self, hook: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.finish_hooks.lock().push(Box::new(hook));
    }

    /// Signal response completion, running and draining all registered hooks.
    ///
    /// Called by the host transport once the response body has been flushed. Hooks run
    /// outside the lock so they may register further hooks without deadlocking; a second
    /// call is a no-op unless new hooks were registered in the meantime.
    pub fn finish(&self) {
        let hooks: Vec<FinishHook> = {
            let mut guard = self.finish_hooks.lock();
            guard.drain(..).collect()
        };
        for hook in hooks {
            hook();
        }
    }
}

/// The response produced by rendering a [`Resource`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: StatusCode,

    /// Response headers; repeated names are supported via append.
    pub headers: HeaderMap,

    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a plain-text response.
    pub fn text(status: StatusCode, text: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Self::new(status, headers, Bytes::from(text.into()))
    }

    /// Create an HTML response.
    pub fn html(status: StatusCode, html: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        Self::new(status, headers, Bytes::from(html.into()))
    }

    /// Create a JSON response from a serializable value.
    pub fn json<T: Serialize>(status: StatusCode, data: &T) -> Result<Self, serde_json::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let body = serde_json::to_vec(data)?;
        Ok(Self::new(status, headers, Bytes::from(body)))
    }

    /// Append a header line, keeping any existing values for the same name.
    ///
    /// Returns `false` and leaves the response untouched when the value contains bytes
    /// that are not legal in a header.
    pub fn append_header(&mut self, name: HeaderName, value: &str) -> bool {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.append(name, value);
                true
            }
            Err(_) => false,
        }
    }

    /// The response body interpreted as UTF-8, with invalid sequences replaced.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
