use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://www.dandh.com/dhXML/xmlDispatch";

/// How the document is carried in the POST.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStyle {
    /// Document as the raw body, `Content-Type: text/xml`.
    #[default]
    RawXml,
    /// HTML form POST with the document in the `xmlDoc` field.
    Form,
}

/// Client settings. Credentials are held separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub post_style: PostStyle,
    /// Max response size in bytes. 0 = no limit.
    #[serde(default)]
    pub max_response_bytes: usize,
    /// Refuse to send orders that lack required fields. Off by default:
    /// the server is the authority on what it accepts.
    #[serde(default)]
    pub strict: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_timeout() -> u64 {
    30_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout(),
            post_style: PostStyle::default(),
            max_response_bytes: 0,
            strict: false,
        }
    }
}
