//! PharmConnect CLI - sign in and browse the portal from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in as the demo pharmacy
//! pharmconnect login -e pharmacy@example.com -p secret
//!
//! # Register a pharmacy with a central fill's connection code
//! pharmconnect register pharmacy -e me@rx.com -p secret -n "Sam Lee" -o "Lee Pharmacy" -c XYZ12345
//!
//! # Register a central fill and receive its connection code
//! pharmconnect register central-fill -e ops@fill.com -p secret -n "Ops" -o "Metro Fill"
//!
//! # Browse the dashboard
//! pharmconnect orders --status delivered
//! ```
//!
//! # Commands
//!
//! - `login`, `register`, `logout`, `whoami` - Session management
//! - `products`, `orders`, `connections`, `pharmacies`, `code` - Dashboard pages
//!
//! The session is stored on disk, so each invocation picks up where the
//! previous one left off.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use pharmconnect_portal::Portal;
use pharmconnect_portal::config::PortalConfig;
use pharmconnect_portal::services::TracingNotifier;
use pharmconnect_portal::views::orders::StatusFilter;

mod commands;
mod telemetry;

#[derive(Parser)]
#[command(name = "pharmconnect")]
#[command(author, version, about = "PharmConnect portal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account
    Register {
        #[command(subcommand)]
        kind: RegisterKind,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse the product catalog
    Products {
        /// Filter by name, category or SKU
        #[arg(short, long, default_value = "")]
        search: String,

        /// Add a product to the cart by ID (repeatable)
        #[arg(short, long = "add")]
        add: Vec<String>,
    },
    /// List orders
    Orders {
        /// Filter by order ID, pharmacy or item name
        #[arg(short, long, default_value = "")]
        search: String,

        /// `all`, `processing`, `shipped`, `delivered` or `cancelled`
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// List connected central fills (pharmacy accounts)
    Connections,
    /// List pharmacies (central-fill accounts)
    Pharmacies {
        /// Filter by name, email or contact person
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show the connection code to share with pharmacies (central-fill accounts)
    Code,
}

#[derive(Subcommand)]
enum RegisterKind {
    /// Register a pharmacy linked to a central fill
    Pharmacy {
        #[command(flatten)]
        account: commands::session::AccountArgs,

        /// Connection code shared by your central fill
        #[arg(short = 'c', long = "code")]
        connection_code: String,
    },
    /// Register a central-fill operator
    CentralFill {
        #[command(flatten)]
        account: commands::session::AccountArgs,
    },
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = match PortalConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_tracing();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &PortalConfig) -> Result<(), Box<dyn std::error::Error>> {
    let portal = Portal::new(config, Arc::new(TracingNotifier))?;
    if let Some(user) = portal.session().user() {
        telemetry::set_sentry_user(&user);
    }

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&portal, &email, password, &mut out).await?;
        }
        Commands::Register { kind } => match kind {
            RegisterKind::Pharmacy {
                account,
                connection_code,
            } => {
                commands::session::register_pharmacy(&portal, account, connection_code, &mut out)
                    .await?;
            }
            RegisterKind::CentralFill { account } => {
                commands::session::register_central_fill(&portal, account, &mut out).await?;
            }
        },
        Commands::Logout => commands::session::logout(&portal),
        Commands::Whoami => commands::session::whoami(&portal, &mut out)?,
        Commands::Products { search, add } => {
            commands::dashboard::products(&portal, &search, &add, &mut out)?;
        }
        Commands::Orders { search, status } => {
            commands::dashboard::orders(&portal, &search, status, &mut out)?;
        }
        Commands::Connections => commands::dashboard::connections(&portal, &mut out)?,
        Commands::Pharmacies { search } => {
            commands::dashboard::pharmacies(&portal, &search, &mut out)?;
        }
        Commands::Code => commands::dashboard::code(&portal, &mut out)?,
    }
    Ok(())
}
