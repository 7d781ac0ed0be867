//! wellstore: command-line client for the admin API.
//!
//! Set WELLSTORE_API_URL to point at the server (default http://localhost:3000).

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;
use wellstore_cli::{format_import_report, init_tracing, ApiClient};
use wellstore_core::models::MessageStatus;

#[derive(Parser)]
#[command(name = "wellstore", about = "Wellstore admin console CLI")]
struct Cli {
    /// Request timeout in seconds; imports can take a while
    #[arg(long, global = true, default_value = "330")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bulk-import products from a ZIP archive
    Import {
        /// Path to the .zip archive
        archive: PathBuf,
        /// Print the raw JSON report
        #[arg(long)]
        json: bool,
    },
    /// Download the import template archive
    Template {
        /// Where to write the template
        #[arg(default_value = "product-import-template.zip")]
        output: PathBuf,
    },
    /// List products
    Products {
        #[arg(long, default_value = "50")]
        limit: i64,
        #[arg(long, default_value = "0")]
        offset: i64,
    },
    /// Category operations
    Categories {
        #[command(subcommand)]
        sub: NamedEntryCommands,
    },
    /// Vendor operations
    Vendors {
        #[command(subcommand)]
        sub: NamedEntryCommands,
    },
    /// Contact inbox operations
    Messages {
        #[command(subcommand)]
        sub: MessageCommands,
    },
}

#[derive(Subcommand)]
enum NamedEntryCommands {
    /// List all entries
    List,
    /// Create an entry
    Add {
        name: String,
    },
}

#[derive(Subcommand)]
enum MessageCommands {
    /// List messages, newest first
    List {
        /// Filter by status: new, read, replied, archived
        #[arg(long)]
        status: Option<MessageStatus>,
        #[arg(long, default_value = "50")]
        limit: i64,
        #[arg(long, default_value = "0")]
        offset: i64,
    },
    /// Message count per status
    Counts,
    /// Change a message's status
    SetStatus {
        id: Uuid,
        status: MessageStatus,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ApiClient::from_env(Duration::from_secs(cli.timeout))
        .context("Failed to create API client. Check WELLSTORE_API_URL")?;

    match cli.command {
        Commands::Import { archive, json } => {
            let result = client.import_products(&archive).await?;
            if json {
                print_json(&result)?;
            } else {
                println!("{}", format_import_report(&result));
            }
        }
        Commands::Template { output } => {
            let data = client.download_template().await?;
            tokio::fs::write(&output, data)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Template written to {}", output.display());
        }
        Commands::Products { limit, offset } => {
            print_json(&client.list_products(limit, offset).await?)?;
        }
        Commands::Categories { sub } => match sub {
            NamedEntryCommands::List => print_json(&client.list_categories().await?)?,
            NamedEntryCommands::Add { name } => print_json(&client.create_category(&name).await?)?,
        },
        Commands::Vendors { sub } => match sub {
            NamedEntryCommands::List => print_json(&client.list_vendors().await?)?,
            NamedEntryCommands::Add { name } => print_json(&client.create_vendor(&name).await?)?,
        },
        Commands::Messages { sub } => match sub {
            MessageCommands::List {
                status,
                limit,
                offset,
            } => print_json(&client.list_messages(status, limit, offset).await?)?,
            MessageCommands::Counts => print_json(&client.message_counts().await?)?,
            MessageCommands::SetStatus { id, status } => {
                print_json(&client.set_message_status(id, status).await?)?
            }
        },
    }

    Ok(())
}
