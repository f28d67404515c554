//! JSON snapshots of the inscription table.
//!
//! E-mails are written as stored, so a backup is only readable with the key
//! that was active when it was taken.

use std::path::{Path, PathBuf};

use inscription_db::table::Inscription;
use inscription_shared::{Error, Result};
use sea_query::{Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqlitePool, prelude::FromRow};
use time::{OffsetDateTime, macros::format_description};

pub const TABLE_NAME: &str = "inscription";
const PREFIX: &str = "backup_";
const EXTENSION: &str = "json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BackupRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupFile {
    pub backup_date: String,
    pub table_name: String,
    pub record_count: usize,
    pub data: Vec<BackupRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackupInfo {
    pub file_name: String,
    pub backup_date: String,
    pub record_count: usize,
    pub size: u64,
}

/// `YYYY-MM-DD_HH-MM-SS` in UTC, used both as `backup_date` and in file names.
pub fn stamp(at: OffsetDateTime) -> Result<String> {
    at.to_offset(time::UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]_[hour]-[minute]-[second]"
        ))
        .map_err(|e| Error::Unknown(e.into()))
}

pub fn file_name(at: OffsetDateTime) -> Result<String> {
    Ok(format!("{PREFIX}{}.{EXTENSION}", stamp(at)?))
}

async fn rows(pool: &SqlitePool) -> Result<Vec<BackupRow>> {
    let statement = sea_query::Query::select()
        .columns([
            Inscription::Id,
            Inscription::Name,
            Inscription::Email,
            Inscription::Message,
            Inscription::CreatedAt,
        ])
        .from(Inscription::Table)
        .order_by(Inscription::CreatedAt, Order::Asc)
        .order_by(Inscription::Id, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, BackupRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

/// Snapshot every inscription into a new file under `folder`, returns the
/// file path and the number of records written.
///
/// Two snapshots taken within the same second share a file name; the latest wins.
#[tracing::instrument(skip(pool))]
pub async fn create(pool: &SqlitePool, folder: &Path) -> Result<(PathBuf, usize)> {
    let now = OffsetDateTime::now_utc();
    let data = rows(pool).await?;
    let backup = BackupFile {
        backup_date: stamp(now)?,
        table_name: TABLE_NAME.to_owned(),
        record_count: data.len(),
        data,
    };

    tokio::fs::create_dir_all(folder).await?;

    let path = folder.join(file_name(now)?);
    let content = serde_json::to_vec_pretty(&backup)?;
    tokio::fs::write(&path, content).await?;

    tracing::info!(path = %path.display(), records = backup.record_count, "backup written");

    Ok((path, backup.record_count))
}

fn is_backup(name: &str) -> bool {
    name.starts_with(PREFIX)
        && name.ends_with(&format!(".{EXTENSION}"))
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
}

async fn file_names(folder: &Path) -> Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(folder).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };

    let mut names = vec![];
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) if is_backup(name) => names.push(name.to_owned()),
            _ => {}
        }
    }

    names.sort();

    Ok(names)
}

async fn read(path: &Path) -> Result<BackupFile> {
    let content = tokio::fs::read(path).await?;

    Ok(serde_json::from_slice(&content)?)
}

/// Backups found in `folder`, oldest first. A missing folder has none.
pub async fn list(folder: &Path) -> Result<Vec<BackupInfo>> {
    let mut infos = vec![];

    for file_name in file_names(folder).await? {
        let path = folder.join(&file_name);
        let size = tokio::fs::metadata(&path).await?.len();
        let backup = read(&path).await?;

        infos.push(BackupInfo {
            file_name,
            backup_date: backup.backup_date,
            record_count: backup.record_count,
            size,
        });
    }

    Ok(infos)
}

/// Read a backup by file name, or the latest one when `file` is `None`.
///
/// `file` must be a bare backup file name, it cannot point outside `folder`.
pub async fn load(folder: &Path, file: Option<&str>) -> Result<(PathBuf, BackupFile)> {
    let path = match file {
        Some(file) if is_backup(file) => folder.join(file),
        Some(file) => inscription_shared::invalid!(format!(
            "Nom de fichier de sauvegarde invalide: {file}"
        )),
        None => match file_names(folder).await?.pop() {
            Some(name) => folder.join(name),
            None => return Err(Error::NotFound),
        },
    };

    if !tokio::fs::try_exists(&path).await? {
        return Err(Error::NotFound);
    }

    let backup = read(&path).await?;

    Ok((path, backup))
}

/// Replace every inscription with the rows of `backup`, in one transaction.
#[tracing::instrument(skip_all, fields(records = backup.data.len()))]
pub async fn restore(pool: &SqlitePool, backup: &BackupFile) -> Result<usize> {
    let mut tx = pool.begin().await?;

    let (sql, values) = sea_query::Query::delete()
        .from_table(Inscription::Table)
        .to_owned()
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    for row in &backup.data {
        let (sql, values) = sea_query::Query::insert()
            .into_table(Inscription::Table)
            .columns([
                Inscription::Id,
                Inscription::Name,
                Inscription::Email,
                Inscription::Message,
                Inscription::CreatedAt,
            ])
            .values_panic([
                row.id.to_owned().into(),
                row.name.to_owned().into(),
                row.email.to_owned().into(),
                row.message.to_owned().into(),
                row.created_at.into(),
            ])
            .to_owned()
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    tracing::info!("backup restored");

    Ok(backup.data.len())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_file_name() {
        let at = datetime!(2025-03-07 09:05:01 UTC);
        assert_eq!(file_name(at).unwrap(), "backup_2025-03-07_09-05-01.json");

        let at = datetime!(2025-03-07 23:30:00 -2);
        assert_eq!(file_name(at).unwrap(), "backup_2025-03-08_01-30-00.json");
        assert_eq!(stamp(at).unwrap(), "2025-03-08_01-30-00");
    }

    #[test]
    fn test_is_backup() {
        assert!(is_backup("backup_2025-03-07_09-05-01.json"));
        assert!(!is_backup("backup_2025-03-07_09-05-01.txt"));
        assert!(!is_backup("notes.json"));
        assert!(!is_backup("backup_/../../etc/passwd.json"));
        assert!(!is_backup("backup_..\\secret.json"));
    }
}
