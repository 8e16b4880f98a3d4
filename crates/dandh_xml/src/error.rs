use thiserror::Error;

#[derive(Error, Debug)]
pub enum DandhError {
    #[error("transport: {0}")]
    Transport(String),

    #[error("http: endpoint returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("response too large: {size} bytes (max {max})")]
    ResponseTooLarge { size: usize, max: usize },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("malformed response: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("missing required fields: {}", missing.join(", "))]
    MissingFields { missing: Vec<String> },

    #[error("serde: {0}")]
    Json(#[from] serde_json::Error),
}

impl DandhError {
    /// True when the response body could not be read as an XML document.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_) | Self::Xml(_))
    }

    /// True for failures raised by the transport (network or HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Http { .. } | Self::ResponseTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DandhError>;
