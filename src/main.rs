use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use txseal::cli::{
    handle_add_command, handle_audit_command, handle_config_command, handle_export_command,
    handle_import_command, handle_inspect_command, handle_list_command, CliContext,
    PASSPHRASE_ENV,
};
use txseal::config::TxsealPaths;
use txseal::models::Category;

#[derive(Parser)]
#[command(
    name = "txseal",
    version,
    about = "Passphrase-sealed export and import of transaction records",
    long_about = "txseal keeps a list of income and expense records and moves them \
                  between machines as a single encrypted file. Anyone with the file \
                  and the key can import it; without the key it cannot be read."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a record
    Add {
        /// Record name
        name: String,
        /// Amount
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Category (income or expense)
        #[arg(short, long, default_value = "expense")]
        category: Category,
        /// Date (YYYY-MM-DD or RFC 3339); defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List records, newest first
    #[command(alias = "ls")]
    List {
        /// Number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export all records to an encrypted file
    Export {
        /// Output file (defaults to the configured export name)
        output: Option<PathBuf>,
        /// Key to seal the file with; prompted for when absent
        ///
        /// Visible to other users in the process list; prefer the
        /// environment variable or the prompt.
        #[arg(long, env = PASSPHRASE_ENV, hide_env_values = true)]
        passphrase: Option<String>,
    },

    /// Import records from an encrypted file
    Import {
        /// File to import
        input: PathBuf,
        /// Key the file was sealed with; prompted for when absent
        ///
        /// Visible to other users in the process list; prefer the
        /// environment variable or the prompt.
        #[arg(long, env = PASSPHRASE_ENV, hide_env_values = true)]
        passphrase: Option<String>,
    },

    /// Show the structure of an encrypted file without opening it
    Inspect {
        /// File to inspect
        input: PathBuf,
    },

    /// Show recent export and import attempts
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    // RUST_LOG overrides; quiet by default so command output stays clean
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Unable to set global default subscriber");
    }
}

fn load_context() -> Result<CliContext> {
    let paths = TxsealPaths::new()?;
    Ok(CliContext::load(paths)?)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add {
            name,
            amount,
            category,
            date,
        }) => handle_add_command(&load_context()?, name, amount, category, date)?,
        Some(Commands::List { limit }) => handle_list_command(&load_context()?, limit)?,
        Some(Commands::Export { output, passphrase }) => {
            handle_export_command(&load_context()?, output, passphrase)?
        }
        Some(Commands::Import { input, passphrase }) => {
            handle_import_command(&load_context()?, input, passphrase)?
        }
        Some(Commands::Inspect { input }) => handle_inspect_command(input)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&load_context()?, limit)?,
        Some(Commands::Config) => handle_config_command(&load_context()?)?,
        None => {
            println!("txseal - sealed transfer of transaction records");
            println!();
            println!("Run 'txseal --help' for usage information.");
        }
    }

    Ok(())
}
