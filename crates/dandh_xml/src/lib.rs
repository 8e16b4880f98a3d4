//! D&H XML API client.
//!
//! Builds request documents for the three supported operations, posts them
//! through a [`Transport`], and turns the XML answer into an [`ApiResult`].
//! Callers never handle XML text directly.
//!
//! # Architecture
//!
//! ```text
//! ApiClient::send_order(&OrderInput)
//!   │
//!   ▼
//! request::order_entry_body()      field tables → fragments → wrappers
//!   │
//!   ▼
//! request::assemble()              <XMLFORMPOST> + <REQUEST> + <LOGIN>
//!   │
//!   ▼  (IO boundary)
//! Transport::send()
//!   │
//!   ▼
//! response::parse_response()       STATUS=failure → Error, else Data(tree)
//! ```
//!
//! No field is validated locally by default. Missing fields are left out of
//! the document and the remote server decides. See [`ClientConfig::strict`].

pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod field;
#[cfg(feature = "http")]
pub mod http;
pub mod request;
pub mod response;
pub mod schema;
pub mod section;
pub mod transport;

pub use client::{ApiClient, Credentials};
pub use config::{ClientConfig, PostStyle};
pub use error::{DandhError, Result};
pub use field::{FieldMap, XmlFragment};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use request::{Operation, OrderInput, Request, StatusLookup};
pub use response::{ApiResult, XmlNode};
pub use transport::Transport;
