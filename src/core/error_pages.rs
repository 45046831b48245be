//! # Error Pages Module
//!
//! This module provides generic error page generation for the authentication gateway.
//! It supports both HTML and JSON error responses with content negotiation based on the
//! request's Accept header.
//!
//! ## Features
//! - Built-in HTML error page template (tera)
//! - JSON error responses for API clients
//! - Configurable brand name and per-status messages
//!
//! The gateway itself only produces error pages for the 500 unexpected-failure path,
//! but the generator is status-generic so hosts can reuse it for their own pages.
//! Internal error detail is never echoed into the rendered body.

use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::debug;

use async_trait::async_trait;

use crate::core::error::{AuthError, AuthResult};
use crate::core::types::{HttpResponse, RequestContext, Resource};

/// Built-in HTML template for error pages.
const BUILTIN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{{ status_code }} - {{ status_text }} | {{ brand_name }}</title>
</head>
<body>
    <h1>{{ status_code }} {{ status_text }}</h1>
    <p>{{ message }}</p>
    <hr>
    <p>{{ brand_name }}</p>
</body>
</html>
"#;

/// Error page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPageConfig {
    /// Brand name to display on error pages.
    pub brand_name: String,

    /// Custom error messages by status code.
    pub custom_messages: HashMap<u16, String>,
}

impl Default for ErrorPageConfig {
    fn default() -> Self {
        let mut custom_messages = HashMap::new();
        custom_messages.insert(
            401,
            "Unauthorized - Authentication is required.".to_string(),
        );
        custom_messages.insert(
            500,
            "Internal Server Error - Something went wrong on our end.".to_string(),
        );

        Self {
            brand_name: "Auth Gateway".to_string(),
            custom_messages,
        }
    }
}

/// Error response format chosen by content negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorResponseFormat {
    /// HTML error page.
    Html,
    /// JSON error response.
    Json,
}

/// Generator for generic error bodies.
pub struct ErrorPageGenerator {
    config: ErrorPageConfig,
    tera: Tera,
}

impl ErrorPageGenerator {
    /// Create a new error page generator with the built-in template registered.
    pub fn new(config: ErrorPageConfig) -> AuthResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("error.html", BUILTIN_TEMPLATE)
            .map_err(|e| AuthError::unexpected(format!("error template failed to compile: {e}")))?;
        Ok(Self { config, tera })
    }

    /// Pick a response format from the request's Accept header.
    ///
    /// JSON wins when the client explicitly accepts `application/json`; everything
    /// else, including an absent Accept header, gets HTML.
    pub fn negotiate(headers: &HeaderMap) -> ErrorResponseFormat {
        let accept = headers
            .get(http::header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        if accept.contains("application/json") {
            ErrorResponseFormat::Json
        } else {
            ErrorResponseFormat::Html
        }
    }

    /// Render the generic body for a status code in the given format.
    pub fn render(&self, status: StatusCode, format: ErrorResponseFormat) -> HttpResponse {
        let status_text = status.canonical_reason().unwrap_or("Error");
        let message = self
            .config
            .custom_messages
            .get(&status.as_u16())
            .cloned()
            .unwrap_or_else(|| status_text.to_string());

        match format {
            ErrorResponseFormat::Json => {
                let body = json!({
                    "error": {
                        "code": status.as_u16(),
                        "message": message,
                    }
                });
                HttpResponse::json(status, &body).unwrap_or_else(|_| {
                    HttpResponse::text(status, format!("{} {}", status.as_u16(), status_text))
                })
            }
            ErrorResponseFormat::Html => {
                let mut context = Context::new();
                context.insert("status_code", &status.as_u16());
                context.insert("status_text", status_text);
                context.insert("message", &message);
                context.insert("brand_name", &self.config.brand_name);

                match self.tera.render("error.html", &context) {
                    Ok(html) => HttpResponse::html(status, html),
                    Err(e) => {
                        debug!("error template rendering failed, using plain body: {e}");
                        HttpResponse::text(status, format!("{} {}", status.as_u16(), status_text))
                    }
                }
            }
        }
    }
}

/// A terminal resource rendering a generic error body for a fixed status code.
///
/// Child lookup returns the page itself, so nested dispatch cannot escape the error
/// state once it has been selected.
pub struct ErrorPage {
    status: StatusCode,
    generator: Arc<ErrorPageGenerator>,
}

impl ErrorPage {
    /// Create an error page for the given status.
    pub fn new(status: StatusCode, generator: Arc<ErrorPageGenerator>) -> Self {
        Self { status, generator }
    }
}

#[async_trait]
impl Resource for ErrorPage {
    async fn render(&self, request: &mut RequestContext) -> HttpResponse {
        let format = ErrorPageGenerator::negotiate(&request.headers);
        self.generator.render(self.status, format)
    }

    async fn get_child_with_default(
        self: Arc<Self>,
        _name: &str,
        _request: &mut RequestContext,
    ) -> Arc<dyn Resource> {
        self
    }
}
