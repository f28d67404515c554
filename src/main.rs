use anyhow::Result;
use clap::{Parser, Subcommand};
use inscription_client::ContactForm;
use inscription_registration::EmailCipher;

mod cli;

/// inscription - Contact form backend and tooling
#[derive(Parser)]
#[command(name = "inscription")]
#[command(about = "Inscription endpoint, backups and contact form client", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Manage inscription backups
    Backup {
        #[command(subcommand)]
        command: cli::backup::BackupCommand,
    },
    /// Submit the contact form once and print the resulting alert
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,

        /// Inscription endpoint (overrides config file)
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Print a new encryption key
    GenerateKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Needs no configuration
    if let Commands::GenerateKey = cli.command {
        println!("{}", EmailCipher::generate_key());
        return Ok(());
    }

    let config = inscription::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    inscription::observability::init_observability(
        "inscription",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate(config).await,
        Commands::Backup { command } => cli::backup::run(config, command).await,
        Commands::Submit {
            name,
            email,
            message,
            endpoint,
        } => cli::submit::submit(config, ContactForm::new(name, email, message), endpoint).await,
        Commands::GenerateKey => Ok(()),
    }
}
