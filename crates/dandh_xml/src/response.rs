//! Response interpretation.
//!
//! Every response shares the same failure shape:
//!
//! ```xml
//! <XMLRESPONSE>
//!   <STATUS>failure</STATUS>
//!   <MESSAGE>Invalid PO</MESSAGE>
//! </XMLRESPONSE>
//! ```
//!
//! Only the literal status `failure` is an error. `success`, any other value
//! and a missing `STATUS` all count as data.

use crate::error::{DandhError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// An owned element of a parsed response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlNode {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first direct child called `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Normalized outcome of one API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult {
    /// The server answered `STATUS=failure`. An ordinary outcome, not a fault.
    Error { message: String },
    /// Anything else: the whole response tree.
    Data(XmlNode),
}

impl ApiResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            Self::Data(_) => None,
        }
    }

    pub fn data(&self) -> Option<&XmlNode> {
        match self {
            Self::Data(node) => Some(node),
            Self::Error { .. } => None,
        }
    }
}

impl Serialize for ApiResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ApiResult", 2)?;
        match self {
            Self::Error { message } => {
                s.serialize_field("error", &true)?;
                s.serialize_field("message", message)?;
            }
            Self::Data(node) => {
                s.serialize_field("error", &false)?;
                s.serialize_field("data", node)?;
            }
        }
        s.end()
    }
}

/// Parse a raw response and classify it.
pub fn parse_response(raw: &str) -> Result<ApiResult> {
    let root = parse_document(raw)?;
    match root.child_text("STATUS") {
        Some("failure") => {
            let message = root.child_text("MESSAGE").unwrap_or_default().to_string();
            Ok(ApiResult::Error { message })
        }
        _ => Ok(ApiResult::Data(root)),
    }
}

/// Parse `raw` into a single owned element tree. Text is kept verbatim
/// except whitespace-only runs between elements, which are layout. Comments,
/// processing instructions and the XML declaration are dropped.
pub fn parse_document(raw: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(raw);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                ensure_single_root(&root)?;
                stack.push(element(&e)?);
            }
            Event::Empty(e) => {
                ensure_single_root(&root)?;
                let node = element(&e)?;
                close(node, &mut stack, &mut root);
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    DandhError::MalformedResponse("closing tag without opening tag".into())
                })?;
                close(node, &mut stack, &mut root);
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(c) => {
                let bytes = c.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DandhError::MalformedResponse(format!(
            "unclosed element <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| DandhError::MalformedResponse("no root element".into()))
}

fn element(start: &BytesStart<'_>) -> Result<XmlNode> {
    let mut node = XmlNode {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..Default::default()
    };
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn ensure_single_root(root: &Option<XmlNode>) -> Result<()> {
    match root {
        Some(r) => Err(DandhError::MalformedResponse(format!(
            "content after root element <{}>",
            r.name
        ))),
        None => Ok(()),
    }
}

fn close(node: XmlNode, stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>) {
    match stack.last_mut() {
        Some(parent) => {
            // indentation before the first child
            if is_layout(&parent.text) {
                parent.text.clear();
            }
            parent.children.push(node);
        }
        None => *root = Some(node),
    }
}

fn is_layout(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn append_text(stack: &mut [XmlNode], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(node) if is_layout(text) && !node.children.is_empty() => Ok(()),
        Some(node) => {
            node.text.push_str(text);
            Ok(())
        }
        None if is_layout(text) => Ok(()),
        None => Err(DandhError::MalformedResponse(
            "text outside of root element".into(),
        )),
    }
}
