//! HTTP transport: posts request documents to the XML dispatch endpoint.
//!
//! Two submission styles are supported:
//! - raw body with `Content-Type: text/xml`
//! - HTML form POST with the document in the `xmlDoc` field
//!
//! Limits:
//! - Timeout per request
//! - Max response size, enforced while reading

use crate::config::{ClientConfig, PostStyle};
use crate::error::{DandhError, Result};
use crate::transport::Transport;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

pub struct HttpTransport {
    endpoint: String,
    post_style: PostStyle,
    max_response_bytes: usize,
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DandhError::Transport(e.to_string()))?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            post_style: config.post_style,
            max_response_bytes: config.max_response_bytes,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Read at most `max_response_bytes + 1` bytes. A declared
    /// Content-Length over the cap is refused before reading anything.
    fn read_body(&self, resp: reqwest::blocking::Response) -> Result<Vec<u8>> {
        let max = self.max_response_bytes;
        if max == 0 {
            let bytes = resp
                .bytes()
                .map_err(|e| DandhError::Transport(e.to_string()))?;
            return Ok(bytes.to_vec());
        }
        if let Some(declared) = resp.content_length() {
            let size = usize::try_from(declared).unwrap_or(usize::MAX);
            if size > max {
                return Err(DandhError::ResponseTooLarge { size, max });
            }
        }

        let mut body = Vec::new();
        resp.take((max as u64).saturating_add(1))
            .read_to_end(&mut body)
            .map_err(|e| DandhError::Transport(e.to_string()))?;
        if body.len() > max {
            return Err(DandhError::ResponseTooLarge {
                size: body.len(),
                max,
            });
        }
        Ok(body)
    }
}

impl Transport for HttpTransport {
    fn send(&self, document: &str) -> Result<String> {
        let req = self.http.post(&self.endpoint);
        let req = match self.post_style {
            PostStyle::RawXml => req
                .header(reqwest::header::CONTENT_TYPE, "text/xml")
                .body(document.to_string()),
            PostStyle::Form => req.form(&[("xmlDoc", document)]),
        };

        let resp = req
            .send()
            .map_err(|e| DandhError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = self.read_body(resp)?;
        debug!(status = status.as_u16(), bytes = body.len(), "dispatch responded");

        let body = String::from_utf8_lossy(&body).into_owned();
        if !status.is_success() {
            return Err(DandhError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
