// CLIP v2 HTTP client
//
// Wraps `reqwest::Client` with bridge URL construction, the
// `hue-application-key` header, status classification and envelope
// unwrapping. Endpoint groups (devices, lights, entertainment, system) are
// inherent methods implemented in sibling modules.

use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::clip::models::{ClipEnvelope, ClipErrorEntry, ClipResponse};
use crate::endpoint::BridgeEndpoint;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Header carrying the pre-provisioned application key.
pub const APP_KEY_HEADER: &str = "hue-application-key";

/// Raw HTTP client for a bridge's CLIP v2 API.
///
/// A response is *valid* when the bridge answers 200 or 404; valid
/// responses are decoded into a [`ClipResponse`] and handed back with their
/// status so the caller decides what a 404 means. Anything else is an
/// [`Error`].
pub struct ClipClient {
    http: reqwest::Client,
    endpoint: BridgeEndpoint,
    base_url: Url,
    app_key: HeaderValue,
}

impl ClipClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(
        endpoint: BridgeEndpoint,
        app_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, endpoint, app_key)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        endpoint: BridgeEndpoint,
        app_key: &SecretString,
    ) -> Result<Self, Error> {
        let mut key = HeaderValue::from_str(app_key.expose_secret())
            .map_err(|_| Error::InvalidAppKey { status: 0 })?;
        key.set_sensitive(true);
        let base_url = endpoint.base_url()?;
        Ok(Self {
            http,
            endpoint,
            base_url,
            app_key: key,
        })
    }

    /// The CLIP base URL (`{scheme}://{address}{api_root}`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self) -> &BridgeEndpoint {
        &self.endpoint
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Whether the bridge's answer counts as valid: 200 or 404.
    pub fn is_valid_status(status: StatusCode) -> bool {
        status == StatusCode::OK || status == StatusCode::NOT_FOUND
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}resource/{resource}`
    pub(crate) fn resource_url(&self, resource: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("resource/{resource}"))?)
    }

    /// `{base}resource/{resource}/{rid}`, with `rid` escaped as one segment.
    pub(crate) fn resource_item_url(&self, resource: &str, rid: &str) -> Result<Url, Error> {
        let mut url = self.resource_url(resource)?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(rid);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn apply_key(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header(APP_KEY_HEADER, self.app_key.clone())
    }

    /// Send an authenticated GET and decode the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<ClipResponse<T>, Error> {
        debug!("GET {}", url);

        let resp = self.apply_key(self.http.get(url)).send().await?;
        Self::parse_envelope(resp).await
    }

    /// Send an authenticated PUT with a JSON body and decode the envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<ClipResponse<T>, Error> {
        debug!("PUT {}", url);

        let resp = self.apply_key(self.http.put(url).json(body)).send().await?;
        Self::parse_envelope(resp).await
    }

    /// PUT an arbitrary JSON body to `resource/{resource}/{rid}`.
    ///
    /// The body is sent verbatim; shaping and clamping is the caller's job.
    pub async fn put_resource(
        &self,
        resource: &str,
        rid: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<ClipResponse<crate::ResourceRef>, Error> {
        let url = self.resource_item_url(resource, rid)?;
        self.put(url, body).await
    }

    /// Classify the status, then decode `{ errors, data }`.
    ///
    /// A 404 whose body is not an envelope still counts as valid; the body
    /// text becomes its single error entry.
    async fn parse_envelope<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<ClipResponse<T>, Error> {
        let status = resp.status();
        trace!(%status, "bridge responded");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::InvalidAppKey {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;

        if !Self::is_valid_status(status) {
            let message = serde_json::from_str::<ClipEnvelope<serde_json::Value>>(&body)
                .ok()
                .filter(|env| !env.errors.is_empty())
                .map_or_else(
                    || preview(&body).to_owned(),
                    |env| {
                        env.errors
                            .into_iter()
                            .map(|e| e.description)
                            .collect::<Vec<_>>()
                            .join("; ")
                    },
                );
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(ClipResponse::empty(status.as_u16()));
        }

        match serde_json::from_str::<ClipEnvelope<T>>(&body) {
            Ok(envelope) => Ok(ClipResponse::from_envelope(status.as_u16(), envelope)),
            Err(_) if status == StatusCode::NOT_FOUND => {
                let mut resp = ClipResponse::empty(status.as_u16());
                resp.errors.push(ClipErrorEntry {
                    description: preview(&body).to_owned(),
                });
                Ok(resp)
            }
            Err(e) => {
                let message = format!("{e} (body preview: {:?})", preview(&body));
                Err(Error::Deserialization { message, body })
            }
        }
    }
}

/// First 200 characters of a response body, for error messages.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(300);
        assert_eq!(preview(&body).chars().count(), 200);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn only_200_and_404_are_valid() {
        assert!(ClipClient::is_valid_status(StatusCode::OK));
        assert!(ClipClient::is_valid_status(StatusCode::NOT_FOUND));
        assert!(!ClipClient::is_valid_status(StatusCode::CREATED));
        assert!(!ClipClient::is_valid_status(StatusCode::BAD_REQUEST));
        assert!(!ClipClient::is_valid_status(StatusCode::SERVICE_UNAVAILABLE));
    }
}
