pub mod endpoints;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::{ChainupConfig, Credentials};
use crate::error::{ChainupError, Result};
use crate::signing::{self, HEADER_API_KEY, HEADER_SIGNATURE, HEADER_TIMESTAMP};
use crate::types::ApiErrorBody;

/// HTTP client wrapper for the ChainUp open API.
#[derive(Debug, Clone)]
pub struct ChainupHttpClient {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl ChainupHttpClient {
    pub fn new(config: ChainupConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials,
        })
    }

    /// GET a public JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(query).send().await?;
        decode(resp).await
    }

    /// GET a signed JSON resource. The query string is part of the signed path.
    pub async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(query).build()?;
        let signed_path = signed_target(path, request.url());
        let headers = self.auth_headers(&Method::GET, &signed_path, "")?;
        request.headers_mut().extend(headers);
        let resp = self.client.execute(request).await?;
        decode(resp).await
    }

    /// POST a signed JSON body.
    ///
    /// The body is serialized once; the same bytes are signed and sent.
    pub async fn post_signed<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body_json = serde_json::to_string(body)?;
        let mut headers = self.auth_headers(&Method::POST, path, &body_json)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .headers(headers)
            .body(body_json)
            .send()
            .await?;
        decode(resp).await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the key/timestamp/signature headers with a fresh timestamp.
    fn auth_headers(&self, method: &Method, path: &str, body: &str) -> Result<HeaderMap> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(ChainupError::MissingCredentials)?;
        let ts = signing::timestamp_ms();
        let signature = signing::sign(&creds.api_secret, ts, method.as_str(), path, body)?;

        let mut headers = HeaderMap::new();
        headers.insert(HEADER_API_KEY, header_value(&creds.api_key)?);
        headers.insert(HEADER_TIMESTAMP, header_value(&ts.to_string())?);
        headers.insert(HEADER_SIGNATURE, header_value(&signature)?);
        Ok(headers)
    }
}

/// `path[?query]` with the query exactly as encoded in the outgoing URL.
pub fn signed_target(path: &str, url: &Url) -> String {
    match url.query() {
        Some(qs) if !qs.is_empty() => format!("{path}?{qs}"),
        _ => path.to_string(),
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ChainupError::InvalidHeader(e.to_string()))
}

/// Map a response to `T`, surfacing HTTP failures and exchange error envelopes.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ChainupError::Http {
            status: status.as_u16(),
            message: body,
        });
    }

    if let Ok(api) = serde_json::from_str::<ApiErrorBody>(&body) {
        if !api.is_success() {
            return Err(ChainupError::Api {
                code: api.code_string(),
                message: api.msg,
            });
        }
    }

    serde_json::from_str::<T>(&body).map_err(|e| {
        debug!(body = %body, "unexpected response body");
        ChainupError::Json(e)
    })
}
