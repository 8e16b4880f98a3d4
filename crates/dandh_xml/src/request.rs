//! Request document assembly.
//!
//! Every builder here is a pure function from its inputs to an
//! [`XmlFragment`]. The full document is
//!
//! ```text
//! <XMLFORMPOST>
//! <REQUEST>{operation}</REQUEST>
//! <LOGIN><USERID>{user}</USERID><PASSWORD>{password}</PASSWORD></LOGIN>
//! {operation body}
//! </XMLFORMPOST>
//! ```

use crate::client::Credentials;
use crate::field::{encode_field, FieldMap, XmlFragment};
use crate::schema::{
    missing_required, Source, END_USER_DATA_FIELDS, ORDER_HEADER_FIELDS, ORDER_ITEM_FIELDS,
};
use crate::section::{append_if_present, section};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PriceAvailability,
    OrderStatus,
    OrderEntry,
}

impl Operation {
    /// Value of the `<REQUEST>` element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAvailability => "price-availability",
            Self::OrderStatus => "orderStatus",
            Self::OrderEntry => "orderEntry",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which reference an order-status lookup is keyed by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusLookup {
    #[default]
    OrderNumber,
    PurchaseOrder,
    Invoice,
}

impl StatusLookup {
    pub fn element(&self) -> &'static str {
        match self {
            Self::OrderNumber => "ORDERNUM",
            Self::PurchaseOrder => "PONUM",
            Self::Invoice => "INVOICE",
        }
    }
}

/// Input for an order-entry request.
///
/// Deserializes from the flat JSON shape callers already use:
///
/// ```json
/// { "PONUM": "PO123", "SHIPCARRIER": "UPS", "SHIPSERVICE": "Ground",
///   "ENDUSERDATA": { "ORGANIZATION": "Acme" },
///   "items": [ { "PARTNUM": "ABC1", "QTY": 5 } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    #[serde(rename = "ENDUSERDATA", default, skip_serializing_if = "Option::is_none")]
    pub end_user_data: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<FieldMap>,
    /// Header fields (PONUM, SHIPCARRIER, ...). Unknown keys are ignored.
    #[serde(flatten)]
    pub header: FieldMap,
}

/// One API call, ready to be rendered into a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    PriceAvailability { part_number: String },
    OrderStatus { reference: String, lookup: StatusLookup },
    OrderEntry(OrderInput),
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Self::PriceAvailability { .. } => Operation::PriceAvailability,
            Self::OrderStatus { .. } => Operation::OrderStatus,
            Self::OrderEntry(_) => Operation::OrderEntry,
        }
    }

    /// The operation body. `drop_ship_password` is `Some` only for drop-ship
    /// accounts.
    pub fn body(&self, drop_ship_password: Option<&str>) -> XmlFragment {
        match self {
            Self::PriceAvailability { part_number } => price_availability_body(part_number),
            Self::OrderStatus { reference, lookup } => order_status_body(reference, *lookup),
            Self::OrderEntry(order) => order_entry_body(order, drop_ship_password),
        }
    }
}

pub fn price_availability_body(part_number: &str) -> XmlFragment {
    encode_field("PARTNUM", part_number, None)
}

pub fn order_status_body(reference: &str, lookup: StatusLookup) -> XmlFragment {
    let tag = lookup.element();
    XmlFragment::raw(format!(
        "\n<STATUSREQUEST><{tag}>{reference}</{tag}></STATUSREQUEST>"
    ))
}

pub fn order_entry_body(order: &OrderInput, drop_ship_password: Option<&str>) -> XmlFragment {
    let mut body = order_header(order, drop_ship_password);
    body.push(order_items(&order.items));
    body
}

/// `<ORDERHEADER>`: header fields in table order, the drop-ship block only
/// for drop-ship accounts, then `<ENDUSERDATA>` when supplied.
pub fn order_header(order: &OrderInput, drop_ship_password: Option<&str>) -> XmlFragment {
    let drop_ship = drop_ship_password.is_some();
    let mut header = XmlFragment::new();

    for spec in ORDER_HEADER_FIELDS.iter().filter(|s| s.enabled(drop_ship)) {
        match (spec.source, drop_ship_password) {
            (Source::Input, _) => {
                append_if_present(&mut header, std::iter::once(spec), &order.header)
            }
            (Source::DropShipPassword, Some(password)) => {
                header.push(encode_field(spec.name, password, spec.max_len))
            }
            (Source::DropShipPassword, None) => {}
        }
    }

    if let Some(end_user) = order.end_user_data.as_ref().filter(|m| !m.is_empty()) {
        header.push(section(END_USER_DATA_FIELDS, end_user).wrap("ENDUSERDATA"));
    }

    header.wrap("ORDERHEADER")
}

/// `<ORDERITEMS>` with one `<ITEM>` per entry; empty when there are no items.
pub fn order_items(items: &[FieldMap]) -> XmlFragment {
    if items.is_empty() {
        return XmlFragment::new();
    }
    let mut all = XmlFragment::new();
    for item in items {
        all.push(section(ORDER_ITEM_FIELDS, item).wrap("ITEM"));
    }
    all.wrap("ORDERITEMS")
}

/// The `<REQUEST>` and `<LOGIN>` lines shared by every operation.
pub fn request_header(operation: Operation, credentials: &Credentials) -> XmlFragment {
    XmlFragment::raw(format!(
        "\n<REQUEST>{}</REQUEST>\n<LOGIN><USERID>{}</USERID><PASSWORD>{}</PASSWORD></LOGIN>",
        operation.as_str(),
        credentials.user_code(),
        credentials.password(),
    ))
}

/// Header + body inside the outer `<XMLFORMPOST>` element.
pub fn assemble(operation: Operation, credentials: &Credentials, body: XmlFragment) -> String {
    let mut doc = request_header(operation, credentials);
    doc.push(body);
    format!("\n<XMLFORMPOST>{doc}\n</XMLFORMPOST>")
}

/// Required fields the order lacks, qualified by section
/// (`ORDERHEADER/PONUM`, `ITEM[1]/QTY`).
pub fn missing_order_fields(order: &OrderInput, drop_ship: bool) -> Vec<String> {
    let header = ORDER_HEADER_FIELDS.iter().filter(|s| s.enabled(drop_ship));
    let mut missing: Vec<String> = missing_required(header, &order.header)
        .into_iter()
        .map(|name| format!("ORDERHEADER/{name}"))
        .collect();
    for (idx, item) in order.items.iter().enumerate() {
        missing.extend(
            missing_required(ORDER_ITEM_FIELDS, item)
                .into_iter()
                .map(|name| format!("ITEM[{idx}]/{name}")),
        );
    }
    missing
}
