// Marketplace HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection,
// and status/error-body mapping. Endpoint groups (apartments, bookings,
// payments, ...) are implemented as inherent methods in `endpoints/` to
// keep this module focused on transport mechanics.

use std::collections::BTreeMap;
use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for the marketplace REST backend.
///
/// All paths are resolved against `base_url`, which always ends in `/`
/// (e.g. `https://hostelio.example/api/`). When a bearer token is set it is
/// attached to every request as `Authorization: Bearer <token>`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.has_token())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self {
            http,
            base_url: with_trailing_slash(base_url),
            token: RwLock::new(None),
        })
    }

    /// The API base URL (always ends in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Bearer token management ───────────────────────────────────────

    /// Attach a bearer token to all subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        debug!("storing bearer token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the bearer token; subsequent requests go out anonymously.
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}{seg1}/{seg2}...`, percent-encoding each segment.
    ///
    /// The backend is inconsistent about trailing slashes, so callers say
    /// explicitly whether the route wants one.
    pub(crate) fn endpoint(&self, segments: &[&str], trailing_slash: bool) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?;
            path.pop_if_empty().extend(segments);
            if trailing_slash {
                path.push("");
            }
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.authorize(self.http.get(url)).send().await?;
        parse_response(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .authorize(self.http.post(url).json(body))
            .send()
            .await?;
        parse_response(resp).await
    }

    /// Send a PUT request with a JSON body and decode the JSON response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let resp = self
            .authorize(self.http.put(url).json(body))
            .send()
            .await?;
        parse_response(resp).await
    }

    /// Send a DELETE request and decode whatever the backend echoes back.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {}", url);
        let resp = self.authorize(self.http.delete(url)).send().await?;
        parse_response(resp).await
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// Map a non-success status (or decode a success body) into the caller's type.
///
/// The backend reports failures in several shapes: `{"error": "..."}`,
/// `{"message": "..."}`, `{"detail": "..."}` (auth layer), or a map of
/// field name → list of messages for serializer validation errors.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let path = resp.url().path().to_owned();
    let body = resp.text().await?;
    trace!(%status, body = %preview(&body), "response");

    if status.is_success() {
        let text = if body.trim().is_empty() { "null" } else { &body };
        return serde_json::from_str(text).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        });
    }

    let parsed: Option<serde_json::Value> = serde_json::from_str(&body).ok();
    let message = parsed
        .as_ref()
        .and_then(error_message)
        .unwrap_or_else(|| preview(&body));

    Err(match status {
        reqwest::StatusCode::UNAUTHORIZED => Error::SessionExpired,
        reqwest::StatusCode::FORBIDDEN => Error::Forbidden { message },
        reqwest::StatusCode::NOT_FOUND => Error::NotFound { path },
        reqwest::StatusCode::REQUEST_TIMEOUT | reqwest::StatusCode::GATEWAY_TIMEOUT => {
            Error::Timeout { timeout_secs: 0 }
        }
        reqwest::StatusCode::BAD_REQUEST => {
            let fields = parsed.as_ref().map(field_errors).unwrap_or_default();
            Error::Validation { message, fields }
        }
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    })
}

fn error_message(value: &serde_json::Value) -> Option<String> {
    ["error", "message", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(String::from)
        .or_else(|| {
            let fields = field_errors(value);
            (!fields.is_empty()).then(|| {
                fields
                    .iter()
                    .map(|(field, msgs)| format!("{field}: {}", msgs.join(", ")))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
        })
}

fn field_errors(value: &serde_json::Value) -> BTreeMap<String, Vec<String>> {
    let Some(obj) = value.as_object() else {
        return BTreeMap::new();
    };
    obj.iter()
        .filter_map(|(field, msgs)| {
            let msgs: Vec<String> = msgs
                .as_array()?
                .iter()
                .filter_map(|m| m.as_str().map(String::from))
                .collect();
            (!msgs.is_empty()).then(|| (field.clone(), msgs))
        })
        .collect()
}
