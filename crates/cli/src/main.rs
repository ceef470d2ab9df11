//! Storeboard CLI - Database migrations and store management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! sb-cli migrate
//!
//! # Create a store for the configured user
//! sb-cli store create -n "My Store"
//!
//! # Add a size, then rename it
//! sb-cli create sizes -s <store-id> -d '{"name":"Large","value":"L"}'
//! sb-cli update sizes -s <store-id> -i <size-id> -d '{"name":"Extra large"}'
//!
//! # List products matching "shirt", most expensive first
//! sb-cli list products -s <store-id> -q shirt --sort price --desc
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `store` - Create, rename or delete a store
//! - `list` / `create` / `update` / `delete` - Manage a store's entities

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storeboard_core::{EntityKind, StoreId};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "sb-cli")]
#[command(author, version, about = "Storeboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage stores
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// List a store's entities
    List {
        /// Entity collection (billboards, categories, colors, sizes, products, orders)
        kind: EntityKind,

        /// Store id
        #[arg(short, long)]
        store: StoreId,

        /// Only rows whose search column contains this text
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Column key to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Create an entity from a JSON body
    Create {
        kind: EntityKind,

        #[arg(short, long)]
        store: StoreId,

        /// JSON body, e.g. '{"label":"Summer","imageUrl":"https://..."}'
        #[arg(short, long)]
        data: String,
    },
    /// Update an entity; fields missing from the body keep their value
    Update {
        kind: EntityKind,

        #[arg(short, long)]
        store: StoreId,

        /// Entity id
        #[arg(short, long)]
        id: String,

        #[arg(short, long)]
        data: String,
    },
    /// Delete an entity
    Delete {
        kind: EntityKind,

        #[arg(short, long)]
        store: StoreId,

        #[arg(short, long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Create a store owned by `STOREBOARD_USER_ID`
    Create {
        #[arg(short, long)]
        name: String,
    },
    /// Rename a store
    Rename {
        #[arg(short, long)]
        store: StoreId,

        #[arg(short, long)]
        name: String,
    },
    /// Delete a store (refused while it still has entities)
    Delete {
        #[arg(short, long)]
        store: StoreId,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sb_cli=info,storeboard_client=info")),
        )
        .init();

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
        Commands::Store { action } => {
            let ctx = Context::from_env()?;
            match action {
                StoreAction::Create { name } => commands::store::create(&ctx, name).await?,
                StoreAction::Rename { store, name } => commands::store::rename(&ctx, store, name).await?,
                StoreAction::Delete { store } => commands::store::delete(&ctx, store).await?,
            }
        }
        Commands::List {
            kind,
            store,
            search,
            sort,
            desc,
        } => {
            let ctx = Context::from_env()?;
            let options = commands::entity::ListOptions { search, sort, desc };
            commands::entity::list(&ctx, kind, store, &options).await?;
        }
        Commands::Create { kind, store, data } => {
            commands::entity::create(&Context::from_env()?, kind, store, &data).await?;
        }
        Commands::Update {
            kind,
            store,
            id,
            data,
        } => {
            commands::entity::update(&Context::from_env()?, kind, store, &id, &data).await?;
        }
        Commands::Delete { kind, store, id } => {
            commands::entity::delete(&Context::from_env()?, kind, store, &id).await?;
        }
    }
    Ok(())
}
