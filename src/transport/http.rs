//! Authenticated HTTP exchange with retry and response discrimination.
//!
//! # Retry strategy
//!
//! Only transport failures are retried: connection errors, timeouts, and
//! requests or bodies that broke mid-flight. A response that arrived is final,
//! even when it describes an application error. The wait before retry *n* is
//! `wait_time * 2^(n-1)`, capped at `max_wait_time`.
//!
//! # Response discrimination
//!
//! ```text
//! non-2xx                       ──▶ Api { status line, context }
//! 2xx + failing error body      ──▶ Api { body status, context }
//! 2xx + anything else           ──▶ decode T  (or Decode error)
//! ```
//!
//! JSON `null`s are dropped before decoding so that an absent value and an
//! explicit null both land on the field's default.

use crate::config::Options;
use crate::error::VeryfiError;
use crate::scheme::error::ApiErrorBody;
use crate::transport::canonical::{CanonicalMap, CanonicalParams};
use crate::transport::encode::MultipartUpload;
use crate::transport::signer::{self, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::transport::{build_url, ApiVersion};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

const CLIENT_ID_HEADER: &str = "Client-Id";

/// One configured connection to a Veryfi API version.
///
/// Cheap to clone: the underlying `reqwest::Client` is a shared pool.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    options: Options,
    version: ApiVersion,
    base_url: String,
}

impl Transport {
    /// Validate `options` and build a transport with a default HTTP client.
    pub fn new(options: Options, version: ApiVersion) -> Result<Self, VeryfiError> {
        options.validate()?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self::assemble(http, options, version))
    }

    /// Validate `options` and use a caller-provided HTTP client, e.g. one
    /// trusting a local test certificate.
    pub fn with_http_client(
        options: Options,
        http: reqwest::Client,
        version: ApiVersion,
    ) -> Result<Self, VeryfiError> {
        options.validate()?;
        Ok(Self::assemble(http, options, version))
    }

    fn assemble(http: reqwest::Client, options: Options, version: ApiVersion) -> Self {
        let base_url = build_url(&options.environment_url, &["api", version.path()]);
        Self {
            http,
            options,
            version,
            base_url,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// `https://<host>/api/<version>`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `uri` with `query` as query string.
    pub async fn get<Q, T>(&self, uri: &str, query: &Q) -> Result<T, VeryfiError>
    where
        Q: CanonicalParams + ?Sized,
        T: DeserializeOwned,
    {
        let params = query.canonical();
        let headers = self.headers(&params, true)?;
        let (status, body) = self
            .execute(Method::GET, uri, |req| {
                req.headers(headers.clone()).query(params.as_pairs())
            })
            .await?;
        self.decode(status, &body)
    }

    /// POST `body` as JSON.
    pub async fn post<B, T>(&self, uri: &str, body: &B) -> Result<T, VeryfiError>
    where
        B: Serialize + CanonicalParams + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, uri, body).await
    }

    /// PUT `body` as JSON.
    pub async fn put<B, T>(&self, uri: &str, body: &B) -> Result<T, VeryfiError>
    where
        B: Serialize + CanonicalParams + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, uri, body).await
    }

    /// DELETE `uri`. Any success body is discarded.
    pub async fn delete(&self, uri: &str) -> Result<(), VeryfiError> {
        let params = CanonicalMap::new();
        let headers = self.headers(&params, true)?;
        let (status, body) = self
            .execute(Method::DELETE, uri, |req| req.headers(headers.clone()))
            .await?;
        let _: IgnoredAny = self.decode(status, &body)?;
        Ok(())
    }

    /// POST a `multipart/form-data` upload. The form is rebuilt per attempt.
    pub async fn post_multipart<T>(&self, uri: &str, upload: &MultipartUpload) -> Result<T, VeryfiError>
    where
        T: DeserializeOwned,
    {
        let headers = self.headers(&upload.fields, false)?;
        let (status, body) = self
            .execute(Method::POST, uri, |req| {
                req.headers(headers.clone()).multipart(upload.to_form())
            })
            .await?;
        self.decode(status, &body)
    }

    async fn send_json<B, T>(&self, method: Method, uri: &str, body: &B) -> Result<T, VeryfiError>
    where
        B: Serialize + CanonicalParams + ?Sized,
        T: DeserializeOwned,
    {
        let params = body.canonical();
        let headers = self.headers(&params, true)?;
        let payload = serde_json::to_vec(body).map_err(VeryfiError::Serialize)?;
        let (status, response) = self
            .execute(method, uri, |req| {
                req.headers(headers.clone()).body(payload.clone())
            })
            .await?;
        self.decode(status, &response)
    }

    /// Headers shared by every attempt of one call. The timestamp is taken
    /// once, so retries carry the same signature.
    fn headers(&self, params: &CanonicalMap, json: bool) -> Result<HeaderMap, VeryfiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("Rust veryfi/", env!("CARGO_PKG_VERSION"))),
        );
        if json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("client-id"),
            header_value(CLIENT_ID_HEADER, &self.options.client_id)?,
        );
        headers.insert(
            AUTHORIZATION,
            header_value(
                "Authorization",
                &format!("apikey {}:{}", self.options.username, self.options.api_key),
            )?,
        );

        if self.version.signs_requests() {
            let timestamp = signer::unix_timestamp();
            let signature =
                signer::generate_signature(&self.options.client_secret, params, timestamp)?;
            headers.insert(
                HeaderName::from_static("x-veryfi-request-timestamp"),
                header_value(TIMESTAMP_HEADER, &timestamp.to_string())?,
            );
            headers.insert(
                HeaderName::from_static("x-veryfi-request-signature"),
                header_value(SIGNATURE_HEADER, &signature)?,
            );
        }
        Ok(headers)
    }

    /// Send with retry until a complete response is read or attempts run out.
    async fn execute<F>(
        &self,
        method: Method,
        uri: &str,
        build: F,
    ) -> Result<(StatusCode, Vec<u8>), VeryfiError>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let url = format!("{}{}", self.base_url, uri);
        let retry = &self.options.http.retry;
        let mut attempt: u32 = 0;

        loop {
            if attempt > 0 {
                let wait = retry.backoff(attempt);
                warn!(
                    "{} {}: retry {}/{} after {}ms",
                    method,
                    uri,
                    attempt,
                    retry.count,
                    wait.as_millis()
                );
                sleep(wait).await;
            }

            debug!("{} {} (attempt {})", method, url, attempt + 1);
            let request = build(
                self.http
                    .request(method.clone(), &url)
                    .timeout(self.options.http.timeout),
            );

            let outcome = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    response.bytes().await.map(|body| (status, body.to_vec()))
                }
                Err(e) => Err(e),
            };

            match outcome {
                Ok((status, body)) => {
                    debug!("{} {} → {} ({} bytes)", method, uri, status, body.len());
                    return Ok((status, body));
                }
                Err(e) if is_transient(&e) && attempt < retry.count => {
                    warn!("{} {}: attempt {} failed: {}", method, uri, attempt + 1, e);
                    attempt += 1;
                }
                Err(source) => {
                    return Err(VeryfiError::Request {
                        attempts: attempt + 1,
                        source,
                    })
                }
            }
        }
    }

    fn decode<T: DeserializeOwned>(&self, status: StatusCode, body: &[u8]) -> Result<T, VeryfiError> {
        let status_line = status_line(status);

        if !status.is_success() {
            let error = serde_json::from_slice::<Value>(body)
                .ok()
                .map(strip_nulls)
                .and_then(|v| serde_json::from_value::<ApiErrorBody>(v).ok())
                .unwrap_or_default();
            return Err(VeryfiError::Api {
                status: status_line,
                context: error_context(self.version, &error),
            });
        }

        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice::<Value>(body).map_err(|source| VeryfiError::Decode {
                status: status_line.clone(),
                source,
            })?
        };
        let value = strip_nulls(value);

        if value.is_object() {
            if let Ok(error) = serde_json::from_value::<ApiErrorBody>(value.clone()) {
                if error.is_failure() {
                    let status = if error.status.is_empty() {
                        status_line
                    } else {
                        error.status.clone()
                    };
                    return Err(VeryfiError::Api {
                        status,
                        context: error_context(self.version, &error),
                    });
                }
            }
        }

        T::deserialize(value).map_err(|source| VeryfiError::Decode {
            status: status_line,
            source,
        })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, VeryfiError> {
    HeaderValue::from_str(value)
        .map_err(|_| VeryfiError::InvalidConfig(format!("{name} is not a valid header value")))
}

fn is_transient(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout() || e.is_request() || e.is_body()
}

/// `"404 Not Found"`, or just the code for unregistered statuses.
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Pick the most specific context string. The order differs per version.
pub(crate) fn error_context(version: ApiVersion, error: &ApiErrorBody) -> String {
    let details = error.details_str();
    let error_str = Some(error.error.clone()).filter(|s| !s.is_empty());
    let message = Some(error.message.clone()).filter(|s| !s.is_empty());
    let ordered = match version {
        ApiVersion::V8 => [details, error_str, message],
        ApiVersion::V7 => [error_str, message, details],
    };
    ordered.into_iter().flatten().next().unwrap_or_default()
}

/// Remove every `null` object member, recursively.
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}
