//! Clearwater CLI - maintenance and bootstrap tools.
//!
//! # Usage
//!
//! ```bash
//! # Create store indexes
//! cw-cli migrate
//!
//! # Ensure an active admin account exists (idempotent)
//! cw-cli admin ensure -e admin@example.com -n "Admin Name"
//!
//! # Check a password against the stored hash
//! cw-cli admin verify -e admin@example.com
//!
//! # Show or update the site settings document
//! cw-cli settings show
//! cw-cli settings set --phone "+1 555 0100" --email hello@example.com --address "1 Main St"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create store indexes
//! - `admin ensure` - Idempotent admin bootstrap
//! - `admin verify` - Credential diagnostic
//! - `admin remove` - Delete an account (destructive)
//! - `settings show` / `settings set` - Settings document CRUD
//!
//! Every command is a sequential run-to-completion script: connect, one or
//! two store operations, disconnect, exit. Exit code is non-zero on any
//! error.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cw-cli")]
#[command(author, version, about = "Clearwater CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create store indexes
    Migrate,
    /// Manage the admin account
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage site settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Ensure an active admin account exists (idempotent)
    Ensure {
        /// Admin email address (default: ADMIN_EMAIL)
        #[arg(short, long)]
        email: Option<String>,

        /// Admin display name (default: ADMIN_NAME)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Check a plaintext password against the stored hash
    Verify {
        /// Email to look up (default: ADMIN_EMAIL)
        #[arg(short, long)]
        email: Option<String>,

        /// Password to check (default: ADMIN_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Delete the account with the given email (destructive)
    Remove {
        /// Email of the account to delete
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the settings document as JSON
    Show,
    /// Create or update the contact settings
    Set {
        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Contact email address
        #[arg(long)]
        email: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// Facebook page URL
        #[arg(long)]
        facebook: Option<String>,

        /// Instagram profile URL
        #[arg(long)]
        instagram: Option<String>,

        /// TikTok profile URL
        #[arg(long)]
        tiktok: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Ensure { email, name } => {
                commands::admin::ensure(email.as_deref(), name.as_deref()).await?;
            }
            AdminAction::Verify { email, password } => {
                commands::admin::verify(email.as_deref(), password).await?;
            }
            AdminAction::Remove { email } => {
                commands::admin::remove(&email).await?;
            }
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show().await?,
            SettingsAction::Set {
                phone,
                email,
                address,
                facebook,
                instagram,
                tiktok,
            } => {
                commands::settings::set(commands::settings::SetArgs {
                    phone,
                    email,
                    address,
                    facebook,
                    instagram,
                    tiktok,
                })
                .await?;
            }
        },
    }
    Ok(())
}
