//! HTTP client for the library backend.
//!
//! A thin wrapper over `fetch` that attaches the bearer token, sends the
//! typed requests defined in `biblioteca_shared::protocol`, and folds every
//! failure into [`ApiError`]. It never touches the session store; callers
//! decide how to react to a 401/403.

use biblioteca_shared::protocol::{ApiRequest, ErrorResponse, HttpMethod};
use gloo_net::http::Request;
use std::fmt;

/// Failure taxonomy surfaced to view controllers.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No usable response: connection failure, aborted request, or a body
    /// that did not decode into the expected shape.
    Network(String),
    /// 4xx with the backend's `{ message }` when it sent one.
    Client { status: u16, message: Option<String> },
    /// 5xx.
    Server { status: u16 },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) => None,
            ApiError::Client { status, .. } | ApiError::Server { status } => Some(*status),
        }
    }

    /// The allow-list check answers 403 when the identifiers are not
    /// pre-approved; registration treats that case specially.
    pub fn is_not_allowed(&self) -> bool {
        matches!(self, ApiError::Client { status: 403, .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Error de red: {}", msg),
            ApiError::Client {
                status,
                message: Some(msg),
            } => write!(f, "{} ({})", msg, status),
            ApiError::Client {
                status,
                message: None,
            } => write!(f, "Error en la solicitud ({})", status),
            ApiError::Server { status } => write!(f, "Error del servidor ({})", status),
        }
    }
}

/// Buckets a non-2xx status into the error taxonomy.
pub fn classify(status: u16, message: Option<String>) -> ApiError {
    if (400..500).contains(&status) {
        ApiError::Client { status, message }
    } else {
        ApiError::Server { status }
    }
}

/// Backend origin: compile-time override, else same-origin.
pub fn backend_url() -> String {
    if let Some(url) = option_env!("BACKEND_URL") {
        return url.to_string();
    }
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq)]
pub struct LibraryApi {
    base_url: String,
    token: Option<String>,
}

impl LibraryApi {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        // An empty token is the same as no token: never send a bare "Bearer".
        let token = token.filter(|t| !t.is_empty());
        Self { base_url, token }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Sends a typed request and decodes its typed response.
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let url = self.url(&request.path());
        let mut builder = match R::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };

        if let Some(token) = &self.token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = match R::METHOD {
            HttpMethod::Get => builder.send().await,
            // Mutations carry a JSON body, even when it is empty.
            _ => builder
                .header("Content-Type", "application/json")
                .json(request)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await,
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.message);
            return Err(classify(response.status(), message));
        }

        response
            .json::<R::Response>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_xx_maps_to_client_error_with_message() {
        let err = classify(403, Some("No permitido".into()));
        assert_eq!(
            err,
            ApiError::Client {
                status: 403,
                message: Some("No permitido".into())
            }
        );
        assert!(err.is_not_allowed());
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn five_xx_maps_to_server_error() {
        let err = classify(502, Some("ignored".into()));
        assert_eq!(err, ApiError::Server { status: 502 });
        assert!(!err.is_not_allowed());
    }

    #[test]
    fn only_forbidden_counts_as_not_allowed() {
        assert!(!classify(401, None).is_not_allowed());
        assert!(!classify(404, None).is_not_allowed());
        assert!(!ApiError::Network("timeout".into()).is_not_allowed());
    }

    #[test]
    fn display_prefers_the_backend_message() {
        let err = classify(400, Some("Falta el campo título".into()));
        assert_eq!(err.to_string(), "Falta el campo título (400)");
        let bare = classify(404, None);
        assert_eq!(bare.to_string(), "Error en la solicitud (404)");
    }

    #[test]
    fn empty_tokens_are_treated_as_absent() {
        let api = LibraryApi::new("https://biblioteca.example".into(), Some(String::new()));
        assert_eq!(api.token, None);
        let api = LibraryApi::new("https://biblioteca.example/".into(), Some("t".into()));
        assert_eq!(api.base_url, "https://biblioteca.example");
        assert_eq!(api.token.as_deref(), Some("t"));
    }

    #[test]
    fn url_joins_with_and_without_leading_slash() {
        let api = LibraryApi::new("https://biblioteca.example".into(), None);
        assert_eq!(api.url("/api/books"), "https://biblioteca.example/api/books");
        assert_eq!(api.url("api/books"), "https://biblioteca.example/api/books");
    }
}
