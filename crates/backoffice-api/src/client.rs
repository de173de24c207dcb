// Backend HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, JSON bodies, and uniform
// status handling. Endpoint groups (categories, products, etc.) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// FastAPI-style error body: `{"detail": "..."}`.
///
/// `detail` may also be a list of validation entries, so it is kept as raw
/// JSON and flattened to text on demand.
#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_text(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Uniform request/response facade over the backend's HTTP surface.
///
/// Every operation performs exactly one network call. There are no retries
/// and no response caching at this layer; callers that need either must
/// add them on top.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL: `{base}{path}`.
    ///
    /// Any path prefix on the base URL is preserved, so a backend mounted
    /// under `https://host/admin` resolves `/api/x` to `https://host/admin/api/x`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request operations ───────────────────────────────────────────

    /// Send a GET request with optional query pairs and decode the payload.
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).query(query).send().await?;
        parse_response(resp).await
    }

    /// Send a POST request with a JSON body and decode the payload.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);

        let resp = self.http.post(url).json(body).send().await?;
        parse_response(resp).await
    }

    /// Send a PATCH request with a JSON body and decode the payload.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {}", url);

        let resp = self.http.patch(url).json(body).send().await?;
        parse_response(resp).await
    }

    /// Send a DELETE request and decode whatever payload comes back.
    ///
    /// Most delete endpoints answer with an empty body; decode into `()`
    /// or `serde_json::Value` in that case.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("DELETE {}", url);

        let resp = self.http.delete(url).send().await?;
        parse_response(resp).await
    }

    /// Upload a file as `multipart/form-data` under the `file` field.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        contents: Bytes,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!(file_name, size = contents.len(), "POST (multipart) {}", url);

        let part = Part::bytes(contents.to_vec()).file_name(file_name.to_owned());
        let form = Form::new().part("file", part);
        let resp = self.http.post(url).multipart(form).send().await?;
        parse_response(resp).await
    }
}

/// Map a response to either the decoded payload or `Error::RequestFailed`.
///
/// An empty success body decodes as JSON `null`, so `()`, `Option<T>` and
/// `serde_json::Value` targets accept it.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_text);
        warn!(status = status.as_u16(), ?detail, "request failed");
        return Err(Error::RequestFailed {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown status").into(),
            detail,
        });
    }

    let body = resp.text().await?;
    trace!(bytes = body.len(), "response body received");

    let text = if body.trim().is_empty() {
        "null"
    } else {
        body.as_str()
    };

    serde_json::from_str(text).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })
}

/// First 200 characters of a body, cut on a char boundary.
fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}

const PREVIEW_CHARS: usize = 200;
