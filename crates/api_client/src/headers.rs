//! Auth header provider

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::warn;

use crate::session::SessionStore;

/// Build the header set for an outbound request
///
/// Always declares a JSON content type. Adds `Authorization: Bearer <token>`
/// only when a token is persisted. A store that cannot be read, or a token
/// that is not a valid header value, yields headers without authorization.
pub async fn auth_headers(store: &dyn SessionStore) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let token = match store.token().await {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "Session store unreadable, sending request without credentials");
            None
        },
    };

    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            },
            Err(_) => {
                warn!("Persisted token is not a valid header value, ignoring it");
            },
        }
    }

    headers
}
