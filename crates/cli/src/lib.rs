//! licport CLI library, exposed for integration tests

pub mod api;
pub mod auth;
pub mod commands;
pub mod http;
pub mod nav;
pub mod output;
pub mod progress;
pub mod session;

use clap::{Parser, Subcommand};
use licport_core::Route;
use std::path::PathBuf;

use commands::purchase::LicensePick;

#[derive(Parser)]
#[command(name = "licport")]
#[command(about = "Buy and manage software licenses from the terminal", long_about = None)]
#[command(version = licport_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email
        email: String,

        /// Password (prompted when omitted; LICPORT_PASSWORD also works)
        #[arg(long)]
        password: Option<String>,
    },

    /// Remove the stored session
    Logout,

    /// Show whether a session is stored
    Status,

    /// List purchasable licenses
    Licenses {
        #[arg(long, default_value = "0")]
        offset: usize,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Price and purchase licenses
    Purchase {
        /// License to buy as <id>[:<quantity>]; repeat for several
        #[arg(long = "license", short = 'l', value_name = "ID[:QTY]")]
        licenses: Vec<LicensePick>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Use the legacy purchase endpoint, billing this many months
        #[arg(long, value_name = "MONTHS")]
        legacy: Option<u32>,
    },

    /// Show placed orders
    History {
        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: usize,

        /// Load every page
        #[arg(long)]
        all: bool,
    },

    /// List account transactions
    Transactions,

    /// Show the account profile
    Profile,

    /// Download an order's invoice as HTML
    Invoice {
        /// Order id
        order_id: String,

        /// Output file (default: invoice-<order-id>.html)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Open the invoice in the browser once saved
        #[arg(long)]
        open: bool,
    },

    /// Initialize .licport.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },
}

impl Commands {
    /// The screen a command stands for. Commands without one work purely on
    /// local state and bypass the session guard.
    pub fn route(&self) -> Option<Route> {
        match self {
            Commands::Login { .. } => Some(commands::login::ROUTE),
            Commands::Licenses { .. } => Some(commands::licenses::ROUTE),
            Commands::Purchase { .. } => Some(commands::purchase::ROUTE),
            Commands::History { .. } => Some(commands::history::ROUTE),
            Commands::Transactions => Some(commands::transactions::ROUTE),
            Commands::Profile => Some(commands::profile::ROUTE),
            Commands::Invoice { .. } => Some(commands::invoice::ROUTE),
            Commands::Logout | Commands::Status | Commands::Init { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// `[output] format` from config; unknown names fall back to terminal.
    pub fn from_config(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Terminal,
        }
    }
}
