//! Main entry point for the Dallani admin CLI.

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::ClientConfig;
use shared::models::{
    AuditAction, CustomerFilter, CustomerSort, DisputeFilter, DriverFilter, InvoiceState, OrderStatus,
    RatingFilter,
};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod output;
mod storage;

use context::Context;

/// Dallani admin CLI
#[derive(Parser)]
#[command(name = "dallani", version)]
#[command(about = "Command-line admin client for the Dallani delivery platform", long_about = None)]
pub struct Cli {
    /// Path to a configuration file (yaml, json or toml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// API root, e.g. `http://localhost:3000/api`. Overrides the file and the environment.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print raw items as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Skip confirmation prompts of mutating commands
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the Dallani CLI
#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the access token
    Login {
        /// Admin email; prompted when omitted
        #[arg(long, short)]
        email: Option<String>,

        /// Read the password from the first line of stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },
    /// Remove the stored access token
    Logout,
    /// Show whether a session is stored
    Whoami,
    /// Show the dashboard figures
    Stats,
    /// List orders
    Orders {
        /// Status sent to the server, e.g. REQUESTED or DISPUTE
        #[arg(long)]
        status: Option<OrderStatus>,

        /// Day to list (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Order id, items or customer name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one order in detail
    Order {
        /// Order id
        id: String,
    },
    /// List drivers
    Drivers {
        #[arg(long, default_value = "all")]
        filter: DriverFilter,

        /// Name or phone
        #[arg(long)]
        search: Option<String>,
    },
    /// Approve, block or unblock a driver
    Driver {
        #[command(subcommand)]
        action: commands::actions::DriverCommand,
    },
    /// List customers
    Customers {
        #[arg(long, default_value = "newest")]
        sort: CustomerSort,

        /// Name or phone, searched by the server
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "all")]
        filter: CustomerFilter,
    },
    /// Block or unblock a customer
    Customer {
        #[command(subcommand)]
        action: commands::actions::CustomerCommand,
    },
    /// List disputes
    Disputes {
        #[arg(long, default_value = "all")]
        filter: DisputeFilter,
    },
    /// Resolve a dispute
    Dispute {
        #[command(subcommand)]
        action: commands::actions::DisputeCommand,
    },
    /// Daily settlement report
    Settlements {
        /// Report day (YYYY-MM-DD), today in UTC by default
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Write the report as CSV into DIR (current directory when omitted)
        #[arg(long, value_name = "DIR", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },
    /// Mark a driver's settlement as paid
    Settlement {
        #[command(subcommand)]
        action: commands::settlements::SettlementCommand,
    },
    /// List uploaded invoices
    Invoices {
        /// Location sent to the server
        #[arg(long)]
        location: Option<String>,

        #[arg(long, default_value = "all")]
        filter: InvoiceState,

        /// Order id
        #[arg(long)]
        search: Option<String>,
    },
    /// List customer ratings
    Ratings {
        #[arg(long, default_value = "all")]
        filter: RatingFilter,

        /// Driver or customer name
        #[arg(long)]
        search: Option<String>,
    },
    /// List the audit log
    AuditLogs {
        /// Action category, e.g. driver_blocked
        #[arg(long)]
        action: Option<AuditAction>,

        /// Day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        search: Option<String>,
    },
    /// Show or change the system settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsCommand,
    },
    /// Write a configuration file with the default settings
    Config {
        /// Output file; the extension picks the format (yaml, yml, json or toml)
        #[arg(long, short, default_value = "dallani.yaml")]
        output: PathBuf,
    },
    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script
        shell: clap_complete::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Config { output } => return commands::config::generate_config(output),
        Commands::Completion { shell } => {
            commands::completion::generate_completion(*shell);
            return Ok(());
        }
        _ => {}
    }

    let config = ClientConfig::load(cli.config.as_deref(), cli.api_url.as_deref())
        .context("failed to load configuration")?;
    logging::init(&config);
    let ctx = Context::new(config, cli.json, cli.yes);

    match cli.command {
        Commands::Login { email, password_stdin } => commands::session::login(&ctx, email, password_stdin).await,
        Commands::Logout => {
            commands::session::logout(&ctx);
            Ok(())
        }
        Commands::Whoami => {
            commands::session::whoami(&ctx);
            Ok(())
        }
        Commands::Stats => commands::stats::show(&ctx).await,
        Commands::Orders { status, date, search } => commands::lists::orders(&ctx, status, date, search).await,
        Commands::Order { id } => commands::lists::order_details(&ctx, &id).await,
        Commands::Drivers { filter, search } => commands::lists::drivers(&ctx, filter, search).await,
        Commands::Driver { action } => commands::actions::driver(&ctx, action).await,
        Commands::Customers { sort, search, filter } => {
            commands::lists::customers(&ctx, sort, search, filter).await
        }
        Commands::Customer { action } => commands::actions::customer(&ctx, action).await,
        Commands::Disputes { filter } => commands::lists::disputes(&ctx, filter).await,
        Commands::Dispute { action } => commands::actions::dispute(&ctx, action).await,
        Commands::Settlements { date, export } => commands::settlements::report(&ctx, date, export).await,
        Commands::Settlement { action } => commands::settlements::settlement(&ctx, action).await,
        Commands::Invoices {
            location,
            filter,
            search,
        } => commands::lists::invoices(&ctx, location, filter, search).await,
        Commands::Ratings { filter, search } => commands::lists::ratings(&ctx, filter, search).await,
        Commands::AuditLogs { action, date, search } => {
            commands::lists::audit_logs(&ctx, action, date, search).await
        }
        Commands::Settings { action } => commands::settings::run(&ctx, action).await,
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}
