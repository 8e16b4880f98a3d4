use colored::Colorize;
use dandh_xml::{
    ApiClient, ApiResult, ClientConfig, Credentials, DandhError, HttpTransport, OrderInput,
    Request, StatusLookup, XmlNode,
};
use std::fmt;
use std::fs;
use std::io::{self, Read};

#[derive(Debug)]
pub enum CliError {
    /// Bad local input (unreadable file, invalid JSON).
    Input(String),
    /// D&H answered STATUS=failure.
    Rejected(String),
    Api(DandhError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(msg) => f.write_str(msg),
            Self::Rejected(msg) => write!(f, "rejected by D&H: {msg}"),
            Self::Api(e) => write!(f, "{e}"),
        }
    }
}

impl From<DandhError> for CliError {
    fn from(e: DandhError) -> Self {
        Self::Api(e)
    }
}

pub struct Output {
    pub json: bool,
    pub dry_run: bool,
}

pub struct Session {
    client: ApiClient<HttpTransport>,
}

impl Session {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, CliError> {
        Ok(Self {
            client: ApiClient::http(credentials, config)?,
        })
    }

    fn run(&self, out: &Output, request: Request) -> Result<(), CliError> {
        if out.dry_run {
            println!("{}", self.client.render(&request).trim_start());
            return Ok(());
        }
        let result = self.client.execute(&request)?;
        print_result(out, &result)?;
        match result {
            ApiResult::Error { message } => Err(CliError::Rejected(message)),
            ApiResult::Data(_) => Ok(()),
        }
    }
}

// ── price ───────────────────────────────────────────────────────

pub fn price(session: &Session, out: &Output, partnum: &str) -> Result<(), CliError> {
    session.run(
        out,
        Request::PriceAvailability {
            part_number: partnum.to_string(),
        },
    )
}

// ── status ──────────────────────────────────────────────────────

pub fn status(
    session: &Session,
    out: &Output,
    reference: &str,
    lookup: StatusLookup,
) -> Result<(), CliError> {
    session.run(
        out,
        Request::OrderStatus {
            reference: reference.to_string(),
            lookup,
        },
    )
}

// ── order ───────────────────────────────────────────────────────

pub fn order(session: &Session, out: &Output, file: &str) -> Result<(), CliError> {
    let content = if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::Input(format!("read stdin: {e}")))?;
        buf
    } else {
        fs::read_to_string(file).map_err(|e| CliError::Input(format!("read file: {e}")))?
    };
    let order = parse_order(&content)?;
    session.run(out, Request::OrderEntry(order))
}

fn parse_order(content: &str) -> Result<OrderInput, CliError> {
    serde_json::from_str(content).map_err(|e| CliError::Input(format!("parse order JSON: {e}")))
}

// ── output ──────────────────────────────────────────────────────

fn print_result(out: &Output, result: &ApiResult) -> Result<(), CliError> {
    if out.json {
        let text = serde_json::to_string_pretty(result).map_err(DandhError::from)?;
        println!("{text}");
        return Ok(());
    }
    match result {
        ApiResult::Error { message } => {
            println!("{} {}", "STATUS:".dimmed(), "failure".red().bold());
            println!("{} {}", "MESSAGE:".dimmed(), message);
        }
        ApiResult::Data(root) => print_node(root, 0),
    }
    Ok(())
}

fn print_node(node: &XmlNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = match node.name.as_str() {
        "STATUS" => node.name.as_str().green().bold(),
        _ if node.children.is_empty() => node.name.as_str().dimmed(),
        _ => node.name.as_str().bold(),
    };
    if node.text.is_empty() {
        println!("{indent}{name}");
    } else {
        println!("{indent}{name} {}", node.text.as_str().cyan());
    }
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
