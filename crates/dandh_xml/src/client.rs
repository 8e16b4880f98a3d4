//! The public entry point: one method per API operation.

use crate::config::ClientConfig;
use crate::digest::document_digest;
use crate::error::{DandhError, Result};
use crate::field::XmlFragment;
use crate::request::{
    assemble, missing_order_fields, order_entry_body, order_status_body, price_availability_body,
    Operation, OrderInput, Request, StatusLookup,
};
use crate::response::{parse_response, ApiResult};
use crate::transport::Transport;
use std::fmt;
use tracing::{debug, warn};

/// Account credentials. A drop-ship password switches the client into
/// drop-ship mode for its whole lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_code: String,
    password: String,
    drop_ship_password: Option<String>,
}

impl Credentials {
    /// An empty drop-ship password is treated as none.
    pub fn new(
        user_code: impl Into<String>,
        password: impl Into<String>,
        drop_ship_password: Option<String>,
    ) -> Self {
        Self {
            user_code: user_code.into(),
            password: password.into(),
            drop_ship_password: drop_ship_password.filter(|p| !p.is_empty()),
        }
    }

    pub fn user_code(&self) -> &str {
        &self.user_code
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn drop_ship_password(&self) -> Option<&str> {
        self.drop_ship_password.as_deref()
    }

    pub fn drop_ship_enabled(&self) -> bool {
        self.drop_ship_password.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_code", &self.user_code)
            .field("password", &"***")
            .field("drop_ship", &self.drop_ship_enabled())
            .finish()
    }
}

pub struct ApiClient<T> {
    credentials: Credentials,
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "http")]
impl ApiClient<crate::http::HttpTransport> {
    /// A client posting to `config.endpoint` over HTTP.
    pub fn http(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = crate::http::HttpTransport::new(&config)?;
        Ok(Self::new(credentials, config, transport))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(credentials: Credentials, config: ClientConfig, transport: T) -> Self {
        Self {
            credentials,
            config,
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Real-time price and availability for one part.
    pub fn price_availability(&self, part_number: &str) -> Result<ApiResult> {
        self.exchange(
            Operation::PriceAvailability,
            price_availability_body(part_number),
        )
    }

    pub fn order_status(&self, reference: &str, lookup: StatusLookup) -> Result<ApiResult> {
        self.exchange(Operation::OrderStatus, order_status_body(reference, lookup))
    }

    pub fn order_status_by_order_number(&self, order_number: &str) -> Result<ApiResult> {
        self.order_status(order_number, StatusLookup::OrderNumber)
    }

    pub fn order_status_by_po(&self, po_number: &str) -> Result<ApiResult> {
        self.order_status(po_number, StatusLookup::PurchaseOrder)
    }

    pub fn order_status_by_invoice(&self, invoice: &str) -> Result<ApiResult> {
        self.order_status(invoice, StatusLookup::Invoice)
    }

    /// Submit an order. Missing fields are omitted from the document, not
    /// reported, unless the client is in strict mode.
    pub fn send_order(&self, order: &OrderInput) -> Result<ApiResult> {
        self.check_order(order)?;
        let body = order_entry_body(order, self.credentials.drop_ship_password());
        self.exchange(Operation::OrderEntry, body)
    }

    pub fn execute(&self, request: &Request) -> Result<ApiResult> {
        if let Request::OrderEntry(order) = request {
            self.check_order(order)?;
        }
        let body = request.body(self.credentials.drop_ship_password());
        self.exchange(request.operation(), body)
    }

    /// The full document `request` would send. Nothing is transmitted.
    pub fn render(&self, request: &Request) -> String {
        let body = request.body(self.credentials.drop_ship_password());
        assemble(request.operation(), &self.credentials, body)
    }

    fn check_order(&self, order: &OrderInput) -> Result<()> {
        if !self.config.strict {
            return Ok(());
        }
        let missing = missing_order_fields(order, self.credentials.drop_ship_enabled());
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DandhError::MissingFields { missing })
        }
    }

    fn exchange(&self, operation: Operation, body: XmlFragment) -> Result<ApiResult> {
        let document = assemble(operation, &self.credentials, body);
        let digest = document_digest(document.as_bytes());
        debug!(%operation, %digest, bytes = document.len(), "sending request");

        let raw = self.transport.send(&document)?;
        debug!(%operation, %digest, bytes = raw.len(), "received response");

        let result = parse_response(&raw)?;
        if let ApiResult::Error { message } = &result {
            warn!(%operation, %digest, %message, "request rejected");
        }
        Ok(result)
    }
}
