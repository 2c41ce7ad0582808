//! pantrydb CLI
//!
//! Local command-line CRUD against a pantrydb database file.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pantrydb::{Config, Customer, FileStore, Repository, StoreError};
use tracing_subscriber::{fmt, EnvFilter};

/// pantrydb CLI
#[derive(Parser, Debug)]
#[command(name = "pantrydb-cli")]
#[command(about = "File-backed in-memory customer store")]
#[command(version)]
struct Args {
    /// Path to the database file
    #[arg(short, long, default_value = "database.json")]
    db: String,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every customer
    List,

    /// Show a customer by id
    Get {
        /// The customer id
        id: u64,
    },

    /// Add a new customer
    Add {
        /// The customer name
        name: String,
    },

    /// Rename an existing customer
    Rename {
        /// The customer id
        id: u64,

        /// The new name
        name: String,
    },

    /// Remove a customer by id
    Remove {
        /// The customer id
        id: u64,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pantrydb=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = Config::builder()
        .db_path(&args.db)
        .pretty(!args.compact)
        .build();

    let store = match FileStore::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to open {}: {}", args.db, e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = run_command(&store, args.command);

    // Drain the final snapshot; a short-lived process must not race its own
    // background writer.
    if let Err(e) = store.close() {
        tracing::error!("failed to persist on close: {}", e);
        return ExitCode::FAILURE;
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(StoreError::NotFound { id }) => {
            tracing::warn!("no customer with id {}", id);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute one subcommand against the open store
fn run_command(store: &FileStore, command: Commands) -> pantrydb::Result<()> {
    match command {
        Commands::List => {
            let mut customers = store.get_all();
            customers.sort_by_key(|c| c.id);

            for customer in &customers {
                println!("{:>6}  {}", customer.id, customer.name);
            }

            Ok(())
        }
        Commands::Get { id } => match store.get(id) {
            Some(customer) => {
                println!("{:>6}  {}", customer.id, customer.name);
                Ok(())
            }
            None => Err(StoreError::NotFound { id }),
        },
        Commands::Add { name } => {
            let created = store.create(Customer::new(name))?;
            println!("created customer {}", created.id);
            Ok(())
        }
        Commands::Rename { id, name } => store.update(Customer::with_id(id, name)),
        Commands::Remove { id } => store.delete(id),
    }
}
