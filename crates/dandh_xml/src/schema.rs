//! Static field tables for the order-entry sections.
//!
//! Each table lists its fields in wire order. Builders iterate the table, not
//! the caller's map, so output order never depends on input order.
//!
//! `Presence::Required` is documentation: nothing is validated unless the
//! client runs in strict mode. Missing fields are simply omitted and the
//! remote server decides whether the order is acceptable.

use crate::field::FieldMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Which accounts a field is emitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Only when the client holds a drop-ship password.
    DropShip,
}

/// Where a field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Input,
    /// The client's drop-ship password, regardless of the input map.
    DropShipPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub max_len: Option<usize>,
    pub presence: Presence,
    pub gate: Gate,
    pub source: Source,
}

impl FieldSpec {
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            max_len: None,
            presence: Presence::Optional,
            gate: Gate::Always,
            source: Source::Input,
        }
    }

    pub const fn required(name: &'static str) -> Self {
        Self {
            presence: Presence::Required,
            ..Self::optional(name)
        }
    }

    pub const fn max(self, len: usize) -> Self {
        Self {
            max_len: Some(len),
            ..self
        }
    }

    pub const fn drop_ship(self) -> Self {
        Self {
            gate: Gate::DropShip,
            ..self
        }
    }

    const fn from_drop_ship_password(self) -> Self {
        Self {
            source: Source::DropShipPassword,
            ..self
        }
    }

    /// Whether the field belongs in a document built with or without
    /// drop-ship mode.
    pub fn enabled(&self, drop_ship: bool) -> bool {
        match self.gate {
            Gate::Always => true,
            Gate::DropShip => drop_ship,
        }
    }
}

/// `<ORDERHEADER>` fields, in wire order. `ENDUSERDATA` follows them.
pub const ORDER_HEADER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("PONUM").max(30),
    // Pickup | UPS | FedEx
    FieldSpec::required("SHIPCARRIER"),
    // Pickup | Ground | 2nd Day Air | Next Day Air | Red Sat Del
    FieldSpec::required("SHIPSERVICE"),
    // overridden per item by <BRANCH>
    FieldSpec::optional("ONLYBRANCH"),
    FieldSpec::optional("PARTSHIPALLOW"),
    FieldSpec::optional("BACKORDERALLOW"),
    FieldSpec::required("DROPSHIPPW")
        .drop_ship()
        .from_drop_ship_password(),
    FieldSpec::required("SHIPTOADDRESS").max(30).drop_ship(),
    FieldSpec::optional("SHIPTOADDRESS2").max(30).drop_ship(),
    FieldSpec::required("SHIPTONAME").max(25).drop_ship(),
    FieldSpec::optional("SHIPTOATTN").max(30).drop_ship(),
    FieldSpec::required("SHIPTOCITY").max(18).drop_ship(),
    // USPS two-letter code
    FieldSpec::required("SHIPTOSTATE").max(2).drop_ship(),
    // 5 digits, or 9 with a hyphen
    FieldSpec::required("SHIPTOZIP").max(10).drop_ship(),
    // any remark puts the order on hold for a sales rep
    FieldSpec::optional("REMARKS").max(58),
];

/// `<ENDUSERDATA>` fields, all optional.
pub const END_USER_DATA_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("ORGANIZATION"),
    FieldSpec::optional("ATTENTION"),
    FieldSpec::optional("ADDRESS"),
    FieldSpec::optional("ADDRESS2"),
    FieldSpec::optional("CITY"),
    FieldSpec::optional("STATE"),
    FieldSpec::optional("ZIP"),
    FieldSpec::optional("PONUM"),
    FieldSpec::optional("DEPARTMENT"),
    FieldSpec::optional("PHONE"),
    FieldSpec::optional("FAX"),
    FieldSpec::optional("EMAIL"),
    FieldSpec::optional("AUTHQUOTENUM"),
    FieldSpec::optional("MCN"),
    FieldSpec::optional("CCOIDNUM"),
    FieldSpec::optional("SERIALNUM"),
    FieldSpec::optional("ESDEMAIL"),
    FieldSpec::optional("RESELLEREMAIL"),
    FieldSpec::optional("CUSTACCTNO"),
    FieldSpec::optional("DATEOFSALE"),
    FieldSpec::optional("MODELNO"),
    FieldSpec::optional("SKU"),
    FieldSpec::optional("DOMAIN"),
    FieldSpec::optional("ADMINEMAIL"),
    FieldSpec::optional("UPDATETYPE"),
    FieldSpec::optional("SUPPORTSTARTDATE"),
];

/// `<ITEM>` fields, in wire order.
pub const ORDER_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("PARTNUM"),
    FieldSpec::required("QTY"),
    // overrides the header's <ONLYBRANCH>
    FieldSpec::optional("BRANCH"),
    // select customers only
    FieldSpec::optional("PRICE"),
];

/// Names of required, input-sourced fields in `specs` that `source` lacks.
/// Only used by strict mode.
pub fn missing_required<'a>(
    specs: impl IntoIterator<Item = &'a FieldSpec>,
    source: &FieldMap,
) -> Vec<&'static str> {
    specs
        .into_iter()
        .filter(|s| s.presence == Presence::Required && s.source == Source::Input)
        .filter(|s| !source.contains_key(s.name))
        .map(|s| s.name)
        .collect()
}
