use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dandh_xml::{ClientConfig, Credentials, PostStyle, StatusLookup};
use std::process;
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod commands;

/// Exit codes.
/// 0 = OK, 2 = input error, 3 = rejected by D&H (STATUS=failure), 4 = transport, 1 = other.
const EXIT_OTHER: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_REJECTED: i32 = 3;
const EXIT_TRANSPORT: i32 = 4;

#[derive(Parser)]
#[command(name = "dandhx", version, about = "D&H XML API CLI: price, status, order")]
struct Cli {
    /// XML dispatch endpoint
    #[arg(long, env = "DANDH_ENDPOINT", default_value = dandh_xml::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Account user code
    #[arg(long, env = "DANDH_USERCODE", default_value = "")]
    user: String,

    /// Account password
    #[arg(long, env = "DANDH_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Drop-ship password; enables drop-ship fields on orders
    #[arg(long, env = "DANDH_DROPSHIP_PASSWORD", hide_env_values = true)]
    dropship_password: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// Post as an HTML form (xmlDoc field) instead of a raw text/xml body
    #[arg(long)]
    form_post: bool,

    /// Print the request document instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price and availability for a part number
    Price {
        /// D&H part number
        partnum: String,
    },
    /// Status of a previously submitted order
    Status {
        /// Order number, PO number or invoice number
        reference: String,
        /// Which reference type to look up by
        #[arg(long, value_enum, default_value_t = LookupArg::Order)]
        by: LookupArg,
    },
    /// Submit an order from a JSON file
    Order {
        /// Path to order JSON file (or - for stdin)
        #[arg(default_value = "-")]
        file: String,
        /// Refuse to send if required fields are missing
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LookupArg {
    Order,
    Po,
    Invoice,
}

impl From<LookupArg> for StatusLookup {
    fn from(arg: LookupArg) -> Self {
        match arg {
            LookupArg::Order => StatusLookup::OrderNumber,
            LookupArg::Po => StatusLookup::PurchaseOrder,
            LookupArg::Invoice => StatusLookup::Invoice,
        }
    }
}

fn exit_code_for(err: &commands::CliError) -> i32 {
    match err {
        commands::CliError::Input(_) => EXIT_INPUT,
        commands::CliError::Rejected(_) => EXIT_REJECTED,
        commands::CliError::Api(e) if e.is_transport() => EXIT_TRANSPORT,
        commands::CliError::Api(dandh_xml::DandhError::MissingFields { .. }) => EXIT_INPUT,
        commands::CliError::Api(_) => EXIT_OTHER,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.as_str())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = ClientConfig {
        endpoint: cli.endpoint,
        timeout_ms: cli.timeout_ms,
        post_style: if cli.form_post {
            PostStyle::Form
        } else {
            PostStyle::RawXml
        },
        max_response_bytes: 0,
        strict: matches!(cli.command, Commands::Order { strict: true, .. }),
    };
    let credentials = Credentials::new(cli.user, cli.password, cli.dropship_password);
    let out = commands::Output {
        json: cli.json,
        dry_run: cli.dry_run,
    };

    let result = commands::Session::new(credentials, config).and_then(|session| match cli.command {
        Commands::Price { partnum } => commands::price(&session, &out, &partnum),
        Commands::Status { reference, by } => {
            commands::status(&session, &out, &reference, by.into())
        }
        Commands::Order { file, .. } => commands::order(&session, &out, &file),
    });

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(exit_code_for(&e));
    }
}
