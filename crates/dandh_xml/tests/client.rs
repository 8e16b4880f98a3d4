use dandh_xml::{
    ApiClient, ApiResult, ClientConfig, Credentials, DandhError, FieldMap, OrderInput, Request,
    StatusLookup, Transport,
};
use serde_json::json;
use std::sync::Mutex;

const OK: &str = "<XMLRESPONSE><STATUS>success</STATUS><ORDERNUM>1234567</ORDERNUM></XMLRESPONSE>";

/// Replies with a canned body and keeps every document it was given.
struct Recorder {
    reply: String,
    sent: Mutex<Vec<String>>,
}

impl Recorder {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.into(),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn last(&self) -> String {
        self.sent.lock().unwrap().last().cloned().expect("nothing sent")
    }

    fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Transport for Recorder {
    fn send(&self, document: &str) -> dandh_xml::Result<String> {
        self.sent.lock().unwrap().push(document.to_string());
        Ok(self.reply.clone())
    }
}

struct Down;

impl Transport for Down {
    fn send(&self, _document: &str) -> dandh_xml::Result<String> {
        Err(DandhError::Http {
            status: 503,
            body: "maintenance".into(),
        })
    }
}

fn client<'a>(transport: &'a Recorder, drop_ship: Option<&str>) -> ApiClient<&'a Recorder> {
    let creds = Credentials::new("acct01", "s3cret", drop_ship.map(String::from));
    ApiClient::new(creds, ClientConfig::default(), transport)
}

fn order() -> OrderInput {
    serde_json::from_value(json!({
        "PONUM": "PO123",
        "SHIPCARRIER": "UPS",
        "SHIPSERVICE": "Ground",
        "items": [ { "PARTNUM": "ABC1", "QTY": "5" } ]
    }))
    .unwrap()
}

// ── Envelope ────────────────────────────────────────────────────

#[test]
fn every_document_has_one_envelope_request_and_login() {
    let t = Recorder::new(OK);
    let c = client(&t, None);
    c.price_availability("ABC1").unwrap();
    c.order_status_by_po("PO9").unwrap();
    c.send_order(&order()).unwrap();

    for doc in t.sent.lock().unwrap().iter() {
        assert!(doc.starts_with("\n<XMLFORMPOST>\n<REQUEST>"), "{doc}");
        assert!(doc.ends_with("\n</XMLFORMPOST>"));
        assert_eq!(doc.matches("<XMLFORMPOST>").count(), 1);
        assert_eq!(doc.matches("<REQUEST>").count(), 1);
        assert_eq!(doc.matches("<LOGIN>").count(), 1);
        assert!(doc.contains(
            "<LOGIN><USERID>acct01</USERID><PASSWORD>s3cret</PASSWORD></LOGIN>"
        ));
    }
}

#[test]
fn request_types_on_the_wire() {
    let t = Recorder::new(OK);
    let c = client(&t, None);
    c.price_availability("ABC1").unwrap();
    assert!(t.last().contains("<REQUEST>price-availability</REQUEST>"));
    assert!(t.last().contains("\n<PARTNUM>ABC1</PARTNUM>"));
    c.order_status_by_order_number("7").unwrap();
    assert!(t.last().contains("<REQUEST>orderStatus</REQUEST>"));
    c.send_order(&order()).unwrap();
    assert!(t.last().contains("<REQUEST>orderEntry</REQUEST>"));
}

// ── Order status ────────────────────────────────────────────────

#[test]
fn status_by_invoice_uses_invoice_only() {
    let t = Recorder::new(OK);
    client(&t, None).order_status_by_invoice("INV-42").unwrap();
    let doc = t.last();
    assert!(doc.contains("<STATUSREQUEST><INVOICE>INV-42</INVOICE></STATUSREQUEST>"));
    assert!(!doc.contains("ORDERNUM"));
    assert!(!doc.contains("PONUM"));
}

#[test]
fn status_convenience_methods_pick_reference_type() {
    let t = Recorder::new(OK);
    let c = client(&t, None);
    c.order_status_by_order_number("1001").unwrap();
    assert!(t.last().contains("<STATUSREQUEST><ORDERNUM>1001</ORDERNUM></STATUSREQUEST>"));
    c.order_status_by_po("PO-5").unwrap();
    assert!(t.last().contains("<STATUSREQUEST><PONUM>PO-5</PONUM></STATUSREQUEST>"));
    c.order_status("1002", StatusLookup::default()).unwrap();
    assert!(t.last().contains("<ORDERNUM>1002</ORDERNUM>"));
}

// ── Order entry ─────────────────────────────────────────────────

#[test]
fn basic_order_end_to_end() {
    let t = Recorder::new(OK);
    let result = client(&t, None).send_order(&order()).unwrap();
    let doc = t.last();

    let header = "\n<ORDERHEADER>\n\t<PONUM>PO123</PONUM>\n\t<SHIPCARRIER>UPS</SHIPCARRIER>\n\t<SHIPSERVICE>Ground</SHIPSERVICE>\n</ORDERHEADER>";
    let items = "\n<ORDERITEMS>\n\t<ITEM>\n\t\t<PARTNUM>ABC1</PARTNUM>\n\t\t<QTY>5</QTY>\n\t</ITEM>\n</ORDERITEMS>";
    assert!(doc.contains(&format!("{header}{items}")), "{doc}");
    for absent in ["DROPSHIPPW", "SHIPTO", "ENDUSERDATA", "REMARKS", "BRANCH", "PRICE"] {
        assert!(!doc.contains(absent), "{absent} in {doc}");
    }
    assert_eq!(
        result.data().and_then(|d| d.child_text("ORDERNUM")),
        Some("1234567")
    );
}

#[test]
fn drop_ship_fields_follow_client_mode() {
    let mut o = order();
    o.header.insert("SHIPTOADDRESS".into(), json!("100 Market Street"));
    o.header.insert("SHIPTOZIP".into(), json!("17101-1234-EXTRA"));

    let t = Recorder::new(OK);
    client(&t, None).send_order(&o).unwrap();
    assert!(!t.last().contains("SHIPTOADDRESS"));
    assert!(!t.last().contains("DROPSHIPPW"));

    let t = Recorder::new(OK);
    client(&t, Some("ds-pass")).send_order(&o).unwrap();
    let doc = t.last();
    assert!(doc.contains("\n\t<DROPSHIPPW>ds-pass</DROPSHIPPW>"));
    assert!(doc.contains("<SHIPTOADDRESS>100 Market Street</SHIPTOADDRESS>"));
    assert!(doc.contains("<SHIPTOZIP>17101-1234</SHIPTOZIP>"));
    assert!(doc.find("<SHIPSERVICE>").unwrap() < doc.find("<DROPSHIPPW>").unwrap());
}

#[test]
fn drop_ship_password_in_input_is_not_used() {
    let mut o = order();
    o.header.insert("DROPSHIPPW".into(), json!("from-input"));
    let t = Recorder::new(OK);
    client(&t, None).send_order(&o).unwrap();
    assert!(!t.last().contains("from-input"));

    let t = Recorder::new(OK);
    client(&t, Some("real")).send_order(&o).unwrap();
    assert!(t.last().contains("<DROPSHIPPW>real</DROPSHIPPW>"));
    assert!(!t.last().contains("from-input"));
}

#[test]
fn order_without_items_has_no_items_section() {
    let mut o = order();
    o.items.clear();
    let t = Recorder::new(OK);
    client(&t, None).send_order(&o).unwrap();
    assert!(t.last().contains("</ORDERHEADER>\n</XMLFORMPOST>"));
    assert!(!t.last().contains("ORDERITEMS"));
}

#[test]
fn remarks_and_end_user_data() {
    let mut o = order();
    o.header.insert("REMARKS".into(), json!("x".repeat(80)));
    o.end_user_data = Some(FieldMap::from([
        ("EMAIL".to_string(), json!("it@example.com")),
        ("ORGANIZATION".to_string(), json!("Acme")),
    ]));
    let t = Recorder::new(OK);
    client(&t, None).send_order(&o).unwrap();
    let doc = t.last();
    assert!(doc.contains(&format!("<REMARKS>{}</REMARKS>", "x".repeat(58))));
    let org = doc.find("<ORGANIZATION>").unwrap();
    let email = doc.find("<EMAIL>").unwrap();
    assert!(doc.find("<REMARKS>").unwrap() < doc.find("<ENDUSERDATA>").unwrap());
    assert!(org < email);
    assert!(doc.find("</ENDUSERDATA>").unwrap() < doc.find("</ORDERHEADER>").unwrap());
}

#[test]
fn missing_required_fields_are_sent_anyway_by_default() {
    let o: OrderInput = serde_json::from_value(json!({ "items": [ { "QTY": 1 } ] })).unwrap();
    let t = Recorder::new(OK);
    client(&t, None).send_order(&o).unwrap();
    assert_eq!(t.count(), 1);
    assert!(t.last().contains("\n<ORDERHEADER>\n</ORDERHEADER>"));
    assert!(!t.last().contains("PARTNUM"));
}

#[test]
fn strict_mode_refuses_incomplete_orders() {
    let t = Recorder::new(OK);
    let cfg = ClientConfig {
        strict: true,
        ..Default::default()
    };
    let c = ApiClient::new(Credentials::new("acct01", "s3cret", None), cfg, &t);
    let mut o = order();
    o.header.remove("SHIPSERVICE");
    match c.send_order(&o) {
        Err(DandhError::MissingFields { missing }) => {
            assert_eq!(missing, vec!["ORDERHEADER/SHIPSERVICE"])
        }
        other => panic!("expected MissingFields, got {other:?}"),
    }
    assert_eq!(t.count(), 0);

    c.send_order(&order()).unwrap();
    assert_eq!(t.count(), 1);
}

// ── Responses and errors ────────────────────────────────────────

#[test]
fn remote_failure_is_a_result_not_an_error() {
    let t = Recorder::new(
        "<XMLRESPONSE><STATUS>failure</STATUS><MESSAGE>Duplicate PO</MESSAGE></XMLRESPONSE>",
    );
    let r = client(&t, None).send_order(&order()).unwrap();
    assert_eq!(
        r,
        ApiResult::Error {
            message: "Duplicate PO".into()
        }
    );
}

#[test]
fn unparseable_response_is_an_error() {
    let t = Recorder::new("<html><body>Service Unavailable</body>");
    let err = client(&t, None).price_availability("ABC1").unwrap_err();
    assert!(err.is_malformed(), "{err}");
}

#[test]
fn transport_errors_pass_through_unchanged() {
    let c = ApiClient::new(
        Credentials::new("acct01", "s3cret", None),
        ClientConfig::default(),
        Down,
    );
    match c.order_status_by_order_number("1") {
        Err(DandhError::Http { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

// ── Requests and dry runs ───────────────────────────────────────

#[test]
fn render_matches_what_execute_sends() {
    let t = Recorder::new(OK);
    let c = client(&t, Some("ds"));
    let req = Request::OrderEntry(order());
    let rendered = c.render(&req);
    c.execute(&req).unwrap();
    assert_eq!(rendered, t.last());

    let req = Request::OrderStatus {
        reference: "INV1".into(),
        lookup: StatusLookup::Invoice,
    };
    let rendered = c.render(&req);
    c.execute(&req).unwrap();
    assert_eq!(rendered, t.last());
}

#[test]
fn client_is_shareable_across_threads() {
    let t = Recorder::new(OK);
    let c = client(&t, None);
    std::thread::scope(|s| {
        for i in 0..4 {
            let c = &c;
            s.spawn(move || c.price_availability(&format!("P{i}")).unwrap());
        }
    });
    assert_eq!(t.count(), 4);
}

#[test]
fn demo_order_file_renders() {
    let o: OrderInput = serde_json::from_str(include_str!("../../../demos/order.json")).unwrap();
    let t = Recorder::new(OK);
    client(&t, Some("ds")).send_order(&o).unwrap();
    let doc = t.last();
    assert!(doc.contains("<SHIPTOSTATE>PA</SHIPTOSTATE>"));
    assert!(doc.contains("<QTY>5</QTY>"));
    assert_eq!(doc.matches("<ITEM>").count(), 2);
    assert!(doc.contains("\n\t\t<ORGANIZATION>Acme Corp</ORGANIZATION>"));
}
