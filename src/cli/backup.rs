use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use inscription::config::Config;
use inscription_registration::backup;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Subcommand)]
pub enum BackupCommand {
    /// Write a snapshot of every inscription
    Create,
    /// Show the available snapshots
    List,
    /// Replace every inscription with a snapshot
    Restore {
        /// Snapshot file name, defaults to the latest one
        #[arg(long)]
        file: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(config: Config, command: BackupCommand) -> Result<()> {
    let folder = Path::new(&config.backup.folder);

    match command {
        BackupCommand::Create => create(&config, folder).await,
        BackupCommand::List => list(folder).await,
        BackupCommand::Restore { file, yes } => restore(&config, folder, file, yes).await,
    }
}

async fn create(config: &Config, folder: &Path) -> Result<()> {
    let pool = inscription::db::create_pool(&config.database.url, 1).await?;
    inscription_db::migrate(&pool).await?;

    let (path, count) = backup::create(&pool, folder).await?;
    pool.close().await;

    println!("Sauvegarde créée : {}", path.display());
    println!("Enregistrements : {count}");

    Ok(())
}

async fn list(folder: &Path) -> Result<()> {
    let backups = backup::list(folder).await?;

    if backups.is_empty() {
        println!("Aucune sauvegarde trouvée");
        return Ok(());
    }

    for (i, info) in backups.iter().enumerate() {
        println!("{}. {}", i + 1, info.file_name);
        println!("   Date : {}", info.backup_date);
        println!("   Enregistrements : {}", info.record_count);
        println!("   Taille : {} octets", info.size);
    }

    Ok(())
}

async fn restore(config: &Config, folder: &Path, file: Option<String>, yes: bool) -> Result<()> {
    let (path, content) = match backup::load(folder, file.as_deref()).await {
        Ok(found) => found,
        Err(inscription_shared::Error::NotFound) => {
            anyhow::bail!(
                "no backup to restore in {} ({})",
                folder.display(),
                file.as_deref().unwrap_or("latest")
            );
        }
        Err(e) => return Err(e.into()),
    };

    println!("Restauration depuis : {}", path.display());
    println!("Enregistrements : {}", content.record_count);

    if !yes && !ask_confirmation().await? {
        println!("Annulé");
        return Ok(());
    }

    let pool = inscription::db::create_pool(&config.database.url, 1).await?;
    inscription_db::migrate(&pool).await?;

    let restored = backup::restore(&pool, &content).await?;
    pool.close().await;

    println!("{restored} enregistrements restaurés");

    Ok(())
}

async fn ask_confirmation() -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(
            "Les données actuelles seront supprimées. Continuer ? (oui/non) : ".as_bytes(),
        )
        .await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;

    Ok(is_confirmed(&answer))
}

fn is_confirmed(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "oui" | "yes" | "y"
    )
}
