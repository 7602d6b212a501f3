//! licport CLI - license portal client

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use licport_core::route::guard;
use licport_core::{PortalConfig, Route};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use licport_cli::commands::{self, purchase::PurchaseOptions, Portal};
use licport_cli::http::HttpClient;
use licport_cli::nav::Navigator;
use licport_cli::session::SessionStore;
use licport_cli::{Cli, Commands, OutputFormat};

/// A protected command ran without a stored session.
#[derive(Debug, thiserror::Error)]
#[error("Not signed in.")]
struct SignedOut;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LICPORT_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        report(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { path } = &cli.command {
        commands::init::run(path.as_deref())?;
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let mut config = PortalConfig::find_and_load(&cwd)?;
    config.apply_env();
    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));

    let navigator = Navigator::new(Route::Home);
    navigator.register(|route| {
        if route == Route::Login {
            eprintln!(
                "  {} Session expired or missing. Run {} to sign in.",
                "→".yellow(),
                "licport login <email>".bold()
            );
        }
    });

    let session = SessionStore::from_config(&config);
    let http = HttpClient::connect(&config, session, navigator.clone())?;
    let portal = Portal::new(http, format);

    let result = enter(&portal, &navigator, cli.command);
    navigator.clear();
    result
}

/// Applies the session guard for the command's route, then runs it.
fn enter(portal: &Portal, navigator: &Navigator, command: Commands) -> Result<()> {
    if let Some(route) = command.route() {
        let authenticated = portal.http.session().has_session();
        let landed = guard(route, authenticated);
        if landed != route {
            tracing::debug!(from = %route, to = %landed, "guard redirected");
            navigator.navigate(landed);
            return Err(SignedOut.into());
        }
        navigator.set_current(route);
    }
    dispatch(portal, command)
}

fn dispatch(portal: &Portal, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            commands::login::run(portal, &email, password.as_deref())
        }
        Commands::Logout => commands::logout::run(portal),
        Commands::Status => commands::status::run(portal),
        Commands::Licenses { offset, limit } => commands::licenses::run(portal, offset, limit),
        Commands::Purchase {
            licenses,
            yes,
            legacy,
        } => commands::purchase::run(
            portal,
            &PurchaseOptions {
                picks: licenses,
                yes,
                legacy_months: legacy,
            },
        ),
        Commands::History { pages, all } => commands::history::run(portal, all, pages),
        Commands::Transactions => commands::transactions::run(portal),
        Commands::Profile => commands::profile::run(portal),
        Commands::Invoice {
            order_id,
            out,
            open,
        } => commands::invoice::run(portal, &order_id, out.as_deref(), open),
        Commands::Init { path } => commands::init::run(path.as_deref()).map(|_| ()),
    }
}

/// Last-resort error display: what failed plus a way to recover.
fn report(err: &anyhow::Error) {
    if err.downcast_ref::<SignedOut>().is_some() {
        return;
    }
    eprintln!();
    eprintln!("  {}", "Something went wrong".red().bold());
    for cause in err.chain() {
        eprintln!("    {}", cause);
    }
    eprintln!();
    eprintln!(
        "  Try again, or run {} to reset the stored session.",
        "licport logout".bold()
    );
}
